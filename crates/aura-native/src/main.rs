mod capture;
mod input;
mod render;

use aura_core::constants::MIC_DEFAULT_SENSITIVITY;
use aura_core::{Configuration, DeviceError, DeviceKind, FrameClock, FrameInput, LandmarkInput, Session};
use winit::keyboard::{Key, NamedKey};
use winit::{event::*, event_loop::EventLoop, window::WindowBuilder};

use capture::MicCapture;
use input::{Action, Controls};

/// Start or stop the microphone, reporting a failed device to the session.
fn toggle_microphone(session: &mut Session, mic: &mut Option<MicCapture>) {
    if mic.take().is_some() {
        session.stop_microphone();
        return;
    }
    match MicCapture::start() {
        Ok(capture) => {
            if session.start_microphone(MIC_DEFAULT_SENSITIVITY) {
                *mic = Some(capture);
            }
        }
        Err(e) => {
            let fallback = session.device_unavailable(&e);
            log::warn!("[audio] continuing with {:?}", fallback);
        }
    }
}

fn key_name(key: &Key) -> Option<&str> {
    match key {
        Key::Character(c) => Some(c.as_str()),
        Key::Named(NamedKey::Space) => Some(" "),
        _ => None,
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::builder()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();

    let mut controls = Controls::new(Configuration::default());
    let mut session = Session::new(controls.config())?;
    // No hand-landmark provider ships with the desktop build.
    session.device_unavailable(&DeviceError::Unavailable {
        device: DeviceKind::Camera,
        reason: "no landmark detector bundled".into(),
    });

    let event_loop = EventLoop::new()?;
    let window = WindowBuilder::new()
        .with_title("aura")
        .with_inner_size(winit::dpi::LogicalSize::new(1280.0, 720.0))
        .build(&event_loop)?;

    let mut gpu = pollster::block_on(render::GpuState::new(&window, session.morph()))?;
    session.set_camera(gpu.camera());

    let mut mic: Option<MicCapture> = None;
    let mut waveform: Vec<u8> = Vec::with_capacity(capture::WAVEFORM_LEN);
    let mut clock = FrameClock::new();

    event_loop.run(move |event, elwt| match event {
        Event::WindowEvent { event, .. } => match event {
            WindowEvent::Resized(size) => {
                gpu.resize(size);
                session.set_camera(gpu.camera());
            }
            WindowEvent::CloseRequested => elwt.exit(),
            WindowEvent::CursorMoved { position, .. } => {
                let (w, h) = gpu.size();
                controls.pointer_moved(position.x, position.y, w, h);
            }
            WindowEvent::CursorLeft { .. } => controls.pointer_left(),
            WindowEvent::KeyboardInput { event, .. } if event.state == ElementState::Pressed && !event.repeat => {
                let action = key_name(&event.logical_key).and_then(|k| controls.key_pressed(k));
                if action == Some(Action::ToggleMicrophone) {
                    toggle_microphone(&mut session, &mut mic);
                }
            }
            _ => {}
        },
        Event::AboutToWait => {
            let dt = clock.tick();
            let has_wave = mic.as_ref().is_some_and(|m| m.snapshot(&mut waveform));
            let input = FrameInput {
                dt,
                spectrum: None,
                waveform: has_wave.then_some(waveform.as_slice()),
                landmarks: LandmarkInput::Unchanged,
                pointer: controls.pointer(),
            };
            if let Err(e) = session.tick(controls.config(), input) {
                log::debug!("[session] kept previous configuration: {}", e);
            }
            gpu.sync_cloud(session.morph());
            match gpu.render(session.uniforms(), session.camera()) {
                Ok(_) => gpu.window.request_redraw(),
                Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                    gpu.resize(gpu.window.inner_size())
                }
                Err(wgpu::SurfaceError::OutOfMemory) => elwt.exit(),
                Err(e) => log::warn!("[render] {}", e),
            }
        }
        _ => {}
    })?;
    Ok(())
}
