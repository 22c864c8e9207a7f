use anyhow::{Context, Result};
use winit::dpi::PhysicalSize;
use winit::window::Window;

use super::surface::{build_config, classify_error, has_area};
use super::{GpuFrame, GpuInit, SurfaceErrorAction};

/// Device, queue and the window's swapchain.
///
/// The surface borrows the window for `'w`; the runtime keeps both in one
/// self-referencing entry so the window always outlives the surface.
///
/// A window may start minimized. The surface is then left unconfigured
/// until the first resize with a non-zero extent.
pub struct Gpu<'w> {
    device: wgpu::Device,
    queue: wgpu::Queue,
    surface: wgpu::Surface<'w>,
    swapchain: wgpu::SurfaceConfiguration,
}

impl<'w> Gpu<'w> {
    /// Binds a surface to `window` and opens a device that can present to it.
    ///
    /// Async because adapter and device requests are; the runtime drives
    /// this with `pollster`.
    pub async fn new(window: &'w Window, init: GpuInit) -> Result<Self> {
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::all(),
            ..Default::default()
        });
        let surface = instance
            .create_surface(window)
            .context("window cannot host a wgpu surface")?;

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .context("no GPU adapter can present to this window")?;
        let info = adapter.get_info();
        log::info!("using adapter {} ({:?})", info.name, info.backend);

        let (device, queue) = adapter
            .request_device(&wgpu::DeviceDescriptor {
                label: Some("parallax device"),
                required_features: init.required_features,
                required_limits: init.required_limits.clone(),
                experimental_features: wgpu::ExperimentalFeatures::disabled(),
                memory_hints: wgpu::MemoryHints::Performance,
                trace: wgpu::Trace::Off,
            })
            .await
            .context("adapter refused the requested device")?;

        let swapchain = build_config(&surface.get_capabilities(&adapter), window.inner_size(), &init)
            .context("surface and adapter share no texture format")?;

        let gpu = Self {
            device,
            queue,
            surface,
            swapchain,
        };
        gpu.configure();
        Ok(gpu)
    }

    pub fn surface_format(&self) -> wgpu::TextureFormat {
        self.swapchain.format
    }

    pub fn device(&self) -> &wgpu::Device {
        &self.device
    }

    pub fn queue(&self) -> &wgpu::Queue {
        &self.queue
    }

    /// False while the window has no area (minimized).
    pub fn is_drawable(&self) -> bool {
        has_area(&self.swapchain)
    }

    /// Records the new physical size and reconfigures when it has area.
    pub fn resize(&mut self, size: PhysicalSize<u32>) {
        self.swapchain.width = size.width;
        self.swapchain.height = size.height;
        self.configure();
    }

    fn configure(&self) {
        if !self.is_drawable() {
            log::debug!("surface has no area; configuration deferred");
            return;
        }
        self.surface.configure(&self.device, &self.swapchain);
        log::debug!(
            "surface configured: {:?} {}x{}",
            self.swapchain.format,
            self.swapchain.width,
            self.swapchain.height
        );
    }

    /// Acquires the next swapchain image with a fresh encoder.
    pub fn begin_frame(&self) -> Result<GpuFrame, wgpu::SurfaceError> {
        let surface_texture = self.surface.get_current_texture()?;
        let view = surface_texture.texture.create_view(&Default::default());
        let encoder = self.device.create_command_encoder(&wgpu::CommandEncoderDescriptor {
            label: Some("parallax frame encoder"),
        });
        Ok(GpuFrame {
            surface_texture,
            view,
            encoder,
        })
    }

    /// Submits the recorded commands and presents the frame.
    pub fn submit(&self, frame: GpuFrame) {
        let GpuFrame {
            surface_texture,
            view,
            encoder,
        } = frame;
        self.queue.submit([encoder.finish()]);
        drop(view);
        surface_texture.present();
    }

    /// Decides how to proceed after `begin_frame` failed. Lost and outdated
    /// swapchains are reconfigured here.
    pub fn handle_surface_error(&mut self, err: wgpu::SurfaceError) -> SurfaceErrorAction {
        let action = classify_error(&err);
        match action {
            SurfaceErrorAction::Reconfigured => {
                log::debug!("surface {err:?}; reconfiguring");
                self.configure();
            }
            SurfaceErrorAction::SkipFrame => log::warn!("surface {err:?}; skipping frame"),
            SurfaceErrorAction::Fatal => log::error!("surface {err:?}; giving up"),
        }
        action
    }
}
