use winit::dpi::PhysicalSize;

use super::{GpuInit, SurfaceErrorAction};

/// Swapchain configuration for a window of `size`.
///
/// The first sRGB format wins when `init.prefer_srgb` is set, otherwise the
/// adapter's preferred one. `None` means the surface and adapter share no
/// format. A zero `size` is kept as-is; such a config must not be applied.
pub(crate) fn build_config(
    caps: &wgpu::SurfaceCapabilities,
    size: PhysicalSize<u32>,
    init: &GpuInit,
) -> Option<wgpu::SurfaceConfiguration> {
    let srgb = if init.prefer_srgb {
        caps.formats.iter().copied().find(|f| f.is_srgb())
    } else {
        None
    };
    let format = srgb.or_else(|| caps.formats.first().copied())?;

    let alpha_mode = init
        .alpha_mode
        .filter(|m| caps.alpha_modes.contains(m))
        .or_else(|| caps.alpha_modes.first().copied())
        .unwrap_or(wgpu::CompositeAlphaMode::Auto);

    Some(wgpu::SurfaceConfiguration {
        usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
        format,
        width: size.width,
        height: size.height,
        present_mode: init.present_mode,
        alpha_mode,
        view_formats: vec![],
        desired_maximum_frame_latency: init.desired_maximum_frame_latency,
    })
}

/// wgpu rejects configuring a surface with a zero extent (minimized window).
pub(crate) fn has_area(config: &wgpu::SurfaceConfiguration) -> bool {
    config.width > 0 && config.height > 0
}

pub(crate) fn classify_error(err: &wgpu::SurfaceError) -> SurfaceErrorAction {
    match err {
        wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated => SurfaceErrorAction::Reconfigured,
        wgpu::SurfaceError::OutOfMemory => SurfaceErrorAction::Fatal,
        wgpu::SurfaceError::Timeout | wgpu::SurfaceError::Other => SurfaceErrorAction::SkipFrame,
    }
}
