// src/wgpu_utils/uniform_buffer.rs
/// Typed wrapper around a uniform buffer
///
/// Remembers the last uploaded value so a frame that produces identical
/// content costs no queue write.
pub struct UniformBuffer<Content> {
    buffer: wgpu::Buffer,
    last_written: Option<Content>,
}

impl<Content: bytemuck::Pod> UniformBuffer<Content> {
    fn label() -> String {
        let full = std::any::type_name::<Content>();
        let short = full.rsplit("::").next().unwrap_or(full);
        format!("{short} uniform buffer")
    }

    pub fn new(device: &wgpu::Device) -> Self {
        let buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some(&Self::label()),
            size: std::mem::size_of::<Content>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        UniformBuffer {
            buffer,
            last_written: None,
        }
    }

    /// Uploads `content`, skipping the write when it matches the last upload
    pub fn update_content(&mut self, queue: &wgpu::Queue, content: Content) {
        let unchanged = self
            .last_written
            .as_ref()
            .is_some_and(|last| bytemuck::bytes_of(last) == bytemuck::bytes_of(&content));
        if unchanged {
            return;
        }

        queue.write_buffer(&self.buffer, 0, bytemuck::bytes_of(&content));
        self.last_written = Some(content);
    }

    pub fn binding_resource(&self) -> wgpu::BindingResource {
        self.buffer.as_entire_binding()
    }
}
