/// What a renderer needs from the device for one frame.
///
/// Borrowed from the `Gpu` for the duration of the draw callback.
pub struct RenderCtx<'a> {
    pub device: &'a wgpu::Device,
    pub queue: &'a wgpu::Queue,
    /// Format the pipeline's color target must match.
    pub surface_format: wgpu::TextureFormat,
}

/// The frame being recorded: its encoder and the swapchain view.
///
/// The view already holds this frame's clear color; passes draw with
/// `LoadOp::Load` on top of it.
pub struct RenderTarget<'a> {
    pub encoder: &'a mut wgpu::CommandEncoder,
    pub color_view: &'a wgpu::TextureView,
}
