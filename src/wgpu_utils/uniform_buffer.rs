// src/wgpu_utils/uniform_buffer.rs
use std::marker::PhantomData;

fn type_label<Content>() -> &'static str {
    let type_name = std::any::type_name::<Content>();
    let pos = type_name.rfind(':').unwrap_or(0);
    if pos > 0 {
        &type_name[(pos + 1)..]
    } else {
        type_name
    }
}

/// Typed uniform buffer holding a single `Content`
pub struct UniformBuffer<Content> {
    buffer: wgpu::Buffer,
    content_type: PhantomData<Content>,
    previous_content: Vec<u8>,
}

impl<Content: bytemuck::Pod> UniformBuffer<Content> {
    pub fn new(device: &wgpu::Device) -> Self {
        let buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some(&format!("UniformBuffer: {}", type_label::<Content>())),
            size: std::mem::size_of::<Content>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        UniformBuffer {
            buffer,
            content_type: PhantomData,
            previous_content: Vec::new(),
        }
    }

    /// Update buffer content (skips the write when nothing changed)
    pub fn update_content(&mut self, queue: &wgpu::Queue, content: Content) {
        let new_content = bytemuck::bytes_of(&content);
        if self.previous_content == new_content {
            return;
        }
        queue.write_buffer(&self.buffer, 0, new_content);
        self.previous_content = new_content.to_vec();
    }

    pub fn binding_resource(&self) -> wgpu::BindingResource {
        self.buffer.as_entire_binding()
    }
}

/// Rounds `size` up to the next multiple of `alignment`
pub fn aligned_stride(size: u64, alignment: u64) -> u64 {
    let alignment = alignment.max(1);
    size.div_ceil(alignment) * alignment
}

/// Lays `items` out back to back with `stride` bytes between their starts
pub fn pack_strided<Content: bytemuck::Pod>(items: &[Content], stride: u64) -> Vec<u8> {
    let stride = stride as usize;
    let mut bytes = vec![0u8; items.len() * stride];
    for (chunk, item) in bytes.chunks_exact_mut(stride).zip(items) {
        let src = bytemuck::bytes_of(item);
        chunk[..src.len()].copy_from_slice(src);
    }
    bytes
}

/// Array of `Content` records addressed through dynamic offsets
///
/// Each record occupies one aligned stride so a single bind group can be
/// re-bound at a different offset for every draw.
pub struct DynamicUniformBuffer<Content> {
    buffer: wgpu::Buffer,
    content_type: PhantomData<Content>,
    stride: u64,
    capacity: usize,
}

impl<Content: bytemuck::Pod> DynamicUniformBuffer<Content> {
    pub fn new(device: &wgpu::Device, capacity: usize) -> Self {
        let alignment = device.limits().min_uniform_buffer_offset_alignment as u64;
        let stride = aligned_stride(std::mem::size_of::<Content>() as u64, alignment);
        let capacity = capacity.max(1);

        DynamicUniformBuffer {
            buffer: Self::create_buffer(device, stride, capacity),
            content_type: PhantomData,
            stride,
            capacity,
        }
    }

    fn create_buffer(device: &wgpu::Device, stride: u64, capacity: usize) -> wgpu::Buffer {
        device.create_buffer(&wgpu::BufferDescriptor {
            label: Some(&format!("DynamicUniformBuffer: {}", type_label::<Content>())),
            size: stride * capacity as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        })
    }

    /// Grows the buffer to hold `len` records
    ///
    /// Returns true when the buffer was recreated and bind groups referencing
    /// it must be rebuilt.
    pub fn ensure_capacity(&mut self, device: &wgpu::Device, len: usize) -> bool {
        if len <= self.capacity {
            return false;
        }
        let capacity = len.next_power_of_two();
        log::debug!(
            "Growing {} from {} to {} records",
            type_label::<Content>(),
            self.capacity,
            capacity
        );
        self.buffer = Self::create_buffer(device, self.stride, capacity);
        self.capacity = capacity;
        true
    }

    /// Writes `items` starting at record 0; call `ensure_capacity` first
    pub fn write(&self, queue: &wgpu::Queue, items: &[Content]) {
        if items.is_empty() {
            return;
        }
        let count = items.len().min(self.capacity);
        queue.write_buffer(&self.buffer, 0, &pack_strided(&items[..count], self.stride));
    }

    pub fn offset(&self, index: usize) -> u32 {
        (index as u64 * self.stride) as u32
    }

    /// Binding covering one record, to be used with a dynamic offset
    pub fn binding_resource(&self) -> wgpu::BindingResource {
        wgpu::BindingResource::Buffer(wgpu::BufferBinding {
            buffer: &self.buffer,
            offset: 0,
            size: wgpu::BufferSize::new(std::mem::size_of::<Content>() as u64),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stride_rounds_up_to_alignment() {
        assert_eq!(aligned_stride(144, 256), 256);
        assert_eq!(aligned_stride(256, 256), 256);
        assert_eq!(aligned_stride(257, 256), 512);
        assert_eq!(aligned_stride(12, 0), 12);
    }

    #[test]
    fn packed_records_start_on_stride_boundaries() {
        let items: [[u32; 2]; 3] = [[1, 2], [3, 4], [5, 6]];
        let bytes = pack_strided(&items, 16);
        assert_eq!(bytes.len(), 48);

        let second: [u32; 2] = bytemuck::pod_read_unaligned(&bytes[16..24]);
        assert_eq!(second, [3, 4]);
        assert!(bytes[8..16].iter().all(|b| *b == 0));
    }
}
