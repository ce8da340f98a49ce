//! GPU grid renderer for GUI mode
//!
//! Draws the same `ScreenBuffer` the terminal front-end writes, using wgpu.
//! Every visible cell becomes one instanced quad: the background color fills
//! the quad and a glyph from the R8 atlas blends the foreground over it.
//! Wide characters are one quad spanning two cells.

use std::collections::HashMap;
use std::sync::Arc;

use bytemuck::{Pod, Zeroable};
use pollster::block_on;
use tracing::{debug, info};
use wgpu::util::DeviceExt;

use crate::core::geometry::GridMetrics;
use crate::core::utf8;
use crate::error::{EditorError, Result};
use crate::gui::font_loader::{CellSize, FontLoader, rasterize_cell};
use crate::terminal::color::{Color, Palette};
use crate::terminal::display::ScreenBuffer;

const ATLAS_SIZE: u32 = 2048;

/// Per-cell instance data
#[repr(C)]
#[derive(Copy, Clone, Debug, Pod, Zeroable)]
struct CellInstance {
    cell_pos: [f32; 2],
    fg_color: [f32; 4],
    bg_color: [f32; 4],
    /// Atlas rectangle: x, y, w, h in UV units; w == 0 means no glyph
    glyph_uv: [f32; 4],
    /// Width in cells
    span: f32,
}

#[repr(C)]
#[derive(Copy, Clone, Debug, Pod, Zeroable)]
struct GridUniforms {
    screen_size: [f32; 2],
    cell_size: [f32; 2],
    grid_offset: [f32; 2],
    _padding: [f32; 2],
}

impl GridUniforms {
    fn from_metrics(metrics: &GridMetrics) -> Self {
        Self {
            screen_size: [metrics.width_px, metrics.height_px],
            cell_size: [metrics.cell_width, metrics.cell_height],
            grid_offset: [metrics.offset_x, metrics.offset_y],
            _padding: [0.0, 0.0],
        }
    }
}

/// Row-based packer for glyph bitmaps in the atlas texture
#[derive(Debug, Clone, PartialEq)]
pub struct AtlasPacker {
    width: u32,
    height: u32,
    cursor_x: u32,
    cursor_y: u32,
    row_height: u32,
}

impl AtlasPacker {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            cursor_x: 0,
            cursor_y: 0,
            row_height: 0,
        }
    }

    /// Reserve a `w` x `h` rectangle (plus a 1px gutter). None when full.
    pub fn alloc(&mut self, w: u32, h: u32) -> Option<(u32, u32)> {
        if w > self.width || h > self.height {
            return None;
        }
        if self.cursor_x + w > self.width {
            self.cursor_x = 0;
            self.cursor_y += self.row_height + 1;
            self.row_height = 0;
        }
        if self.cursor_y + h > self.height {
            return None;
        }
        let pos = (self.cursor_x, self.cursor_y);
        self.cursor_x += w + 1;
        self.row_height = self.row_height.max(h);
        Some(pos)
    }

    pub fn reset(&mut self) {
        self.cursor_x = 0;
        self.cursor_y = 0;
        self.row_height = 0;
    }
}

/// Atlas location of a rasterized glyph
#[derive(Debug, Clone, Copy, PartialEq)]
struct GlyphSlot {
    uv: [f32; 4],
}

impl GlyphSlot {
    const EMPTY: GlyphSlot = GlyphSlot { uv: [0.0; 4] };
}

/// Line segments of a light box drawing character: (left, right, up, down)
fn box_segments(ch: char) -> Option<(bool, bool, bool, bool)> {
    Some(match ch {
        '─' => (true, true, false, false),
        '│' => (false, false, true, true),
        '┌' => (false, true, false, true),
        '┐' => (true, false, false, true),
        '└' => (false, true, true, false),
        '┘' => (true, false, true, false),
        '├' => (false, true, true, true),
        '┤' => (true, false, true, true),
        '┬' => (true, true, false, true),
        '┴' => (true, true, true, false),
        '┼' => (true, true, true, true),
        _ => return None,
    })
}

/// Draw a box drawing character procedurally so borders join across cells.
/// Returns false for characters it does not handle.
pub fn draw_box_char(bitmap: &mut [u8], ch: char, cell_w: u32, cell_h: u32) -> bool {
    let Some((left, right, up, down)) = box_segments(ch) else {
        return false;
    };
    let thickness = 1u32.max(cell_h / 12);
    let x0 = (cell_w / 2).saturating_sub(thickness / 2);
    let y0 = (cell_h / 2).saturating_sub(thickness / 2);
    let x1 = (x0 + thickness).min(cell_w);
    let y1 = (y0 + thickness).min(cell_h);

    let mut fill = |xs: std::ops::Range<u32>, ys: std::ops::Range<u32>| {
        for y in ys {
            for x in xs.clone() {
                bitmap[(y * cell_w + x) as usize] = 255;
            }
        }
    };

    if left || right {
        let xs = if left { 0 } else { x0 }..if right { cell_w } else { x1 };
        fill(xs, y0..y1);
    }
    if up || down {
        let ys = if up { 0 } else { y0 }..if down { cell_h } else { y1 };
        fill(x0..x1, ys);
    }
    true
}

/// Hollow box shown for characters no font can draw
fn missing_glyph_box(cell_w: u32, cell_h: u32) -> Vec<u8> {
    let mut bitmap = vec![0u8; (cell_w * cell_h) as usize];
    let margin = 2u32;
    if cell_w <= margin * 2 || cell_h <= margin * 2 {
        return bitmap;
    }
    for x in margin..cell_w - margin {
        bitmap[(margin * cell_w + x) as usize] = 128;
        bitmap[((cell_h - margin - 1) * cell_w + x) as usize] = 128;
    }
    for y in margin..cell_h - margin {
        bitmap[(y * cell_w + margin) as usize] = 128;
        bitmap[(y * cell_w + cell_w - margin - 1) as usize] = 128;
    }
    bitmap
}

/// GPU-accelerated cell grid renderer
pub struct GridRenderer {
    device: wgpu::Device,
    queue: wgpu::Queue,
    surface: wgpu::Surface<'static>,
    config: wgpu::SurfaceConfiguration,
    size: (u32, u32),

    pipeline: wgpu::RenderPipeline,
    bind_group: wgpu::BindGroup,
    uniform_buffer: wgpu::Buffer,
    instance_buffer: Option<wgpu::Buffer>,
    instance_capacity: usize,

    fonts: FontLoader,
    font_px: f32,
    cell: CellSize,
    metrics: GridMetrics,

    glyph_atlas: wgpu::Texture,
    glyph_cache: HashMap<char, GlyphSlot>,
    atlas: AtlasPacker,
    /// Bumped whenever the atlas is cleared
    atlas_generation: u64,
}

impl GridRenderer {
    /// Create a renderer drawing into `window`.
    /// `font_size` is in logical pixels and scaled by `scale_factor`.
    pub fn new(
        window: Arc<winit::window::Window>,
        font: Option<&str>,
        font_size: f32,
        scale_factor: f64,
    ) -> Result<Self> {
        let size = window.inner_size();
        let font_px = font_size * scale_factor as f32;
        debug!(scale_factor, font_px, width = size.width, height = size.height, "creating renderer");

        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::PRIMARY,
            ..Default::default()
        });
        let surface = instance
            .create_surface(window)
            .map_err(|e| EditorError::Gui(format!("cannot create surface: {}", e)))?;

        let adapter = block_on(instance.request_adapter(&wgpu::RequestAdapterOptions {
            power_preference: wgpu::PowerPreference::HighPerformance,
            compatible_surface: Some(&surface),
            force_fallback_adapter: false,
        }))
        .map_err(|e| EditorError::Gui(format!("no suitable GPU adapter found: {}", e)))?;
        info!(adapter = ?adapter.get_info().name, "GPU adapter selected");

        let (device, queue) = block_on(adapter.request_device(&wgpu::DeviceDescriptor {
            label: Some("quill device"),
            required_features: wgpu::Features::empty(),
            required_limits: wgpu::Limits::downlevel_defaults(),
            memory_hints: wgpu::MemoryHints::Performance,
            experimental_features: wgpu::ExperimentalFeatures::default(),
            trace: wgpu::Trace::default(),
        }))
        .map_err(|e| EditorError::Gui(format!("cannot open GPU device: {}", e)))?;

        // Palette colors are sRGB values already; prefer a non-sRGB surface
        let caps = surface.get_capabilities(&adapter);
        let format = caps
            .formats
            .iter()
            .find(|f| {
                matches!(
                    f,
                    wgpu::TextureFormat::Bgra8Unorm | wgpu::TextureFormat::Rgba8Unorm
                )
            })
            .or_else(|| caps.formats.first())
            .copied()
            .ok_or_else(|| EditorError::Gui("surface reports no texture formats".into()))?;
        let alpha_mode = caps
            .alpha_modes
            .first()
            .copied()
            .unwrap_or(wgpu::CompositeAlphaMode::Auto);

        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width: size.width.max(1),
            height: size.height.max(1),
            present_mode: wgpu::PresentMode::AutoVsync,
            alpha_mode,
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);

        let fonts = FontLoader::new(font)?;
        let cell = fonts.cell_size(font_px);
        let metrics = GridMetrics::new(
            cell.width,
            cell.height,
            config.width as f32,
            config.height as f32,
        );

        let glyph_atlas = device.create_texture(&wgpu::TextureDescriptor {
            label: Some("Glyph Atlas"),
            size: wgpu::Extent3d {
                width: ATLAS_SIZE,
                height: ATLAS_SIZE,
                depth_or_array_layers: 1,
            },
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: wgpu::TextureFormat::R8Unorm,
            usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
            view_formats: &[],
        });
        let atlas_view = glyph_atlas.create_view(&wgpu::TextureViewDescriptor::default());
        let sampler = device.create_sampler(&wgpu::SamplerDescriptor {
            address_mode_u: wgpu::AddressMode::ClampToEdge,
            address_mode_v: wgpu::AddressMode::ClampToEdge,
            mag_filter: wgpu::FilterMode::Nearest,
            min_filter: wgpu::FilterMode::Nearest,
            ..Default::default()
        });

        let uniform_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Grid Uniforms"),
            contents: bytemuck::cast_slice(&[GridUniforms::from_metrics(&metrics)]),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });

        let bind_group_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("Grid Bind Group Layout"),
            entries: &[
                wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::VERTEX_FRAGMENT,
                    ty: wgpu::BindingType::Buffer {
                        ty: wgpu::BufferBindingType::Uniform,
                        has_dynamic_offset: false,
                        min_binding_size: None,
                    },
                    count: None,
                },
                wgpu::BindGroupLayoutEntry {
                    binding: 1,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Texture {
                        sample_type: wgpu::TextureSampleType::Float { filterable: true },
                        view_dimension: wgpu::TextureViewDimension::D2,
                        multisampled: false,
                    },
                    count: None,
                },
                wgpu::BindGroupLayoutEntry {
                    binding: 2,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Sampler(wgpu::SamplerBindingType::NonFiltering),
                    count: None,
                },
            ],
        });

        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("Grid Bind Group"),
            layout: &bind_group_layout,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: uniform_buffer.as_entire_binding(),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: wgpu::BindingResource::TextureView(&atlas_view),
                },
                wgpu::BindGroupEntry {
                    binding: 2,
                    resource: wgpu::BindingResource::Sampler(&sampler),
                },
            ],
        });

        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("Grid Shader"),
            source: wgpu::ShaderSource::Wgsl(include_str!("grid_shader.wgsl").into()),
        });
        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("Grid Pipeline Layout"),
            bind_group_layouts: &[&bind_group_layout],
            push_constant_ranges: &[],
        });
        let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("Grid Pipeline"),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: Some("vs_main"),
                buffers: &[wgpu::VertexBufferLayout {
                    array_stride: std::mem::size_of::<CellInstance>() as wgpu::BufferAddress,
                    step_mode: wgpu::VertexStepMode::Instance,
                    attributes: &wgpu::vertex_attr_array![
                        0 => Float32x2,
                        1 => Float32x4,
                        2 => Float32x4,
                        3 => Float32x4,
                        4 => Float32,
                    ],
                }],
                compilation_options: wgpu::PipelineCompilationOptions::default(),
            },
            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: Some("fs_main"),
                targets: &[Some(wgpu::ColorTargetState {
                    format: config.format,
                    blend: Some(wgpu::BlendState::REPLACE),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
                compilation_options: wgpu::PipelineCompilationOptions::default(),
            }),
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                ..Default::default()
            },
            depth_stencil: None,
            multisample: wgpu::MultisampleState::default(),
            multiview: None,
            cache: None,
        });

        info!(
            cell_width = cell.width,
            cell_height = cell.height,
            cols = metrics.cols,
            rows = metrics.rows,
            "renderer ready"
        );

        Ok(Self {
            device,
            queue,
            surface,
            size: (config.width, config.height),
            config,
            pipeline,
            bind_group,
            uniform_buffer,
            instance_buffer: None,
            instance_capacity: 0,
            fonts,
            font_px,
            cell,
            metrics,
            glyph_atlas,
            glyph_cache: HashMap::new(),
            atlas: AtlasPacker::new(ATLAS_SIZE, ATLAS_SIZE),
            atlas_generation: 0,
        })
    }

    /// Resize the surface; zero sizes (minimized window) are ignored
    pub fn resize(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }
        self.size = (width, height);
        self.config.width = width;
        self.config.height = height;
        self.surface.configure(&self.device, &self.config);

        self.metrics = GridMetrics::new(self.cell.width, self.cell.height, width as f32, height as f32);
        self.queue.write_buffer(
            &self.uniform_buffer,
            0,
            bytemuck::cast_slice(&[GridUniforms::from_metrics(&self.metrics)]),
        );
    }

    /// Grid size in cells (columns, rows)
    pub fn grid_size(&self) -> (usize, usize) {
        self.metrics.grid_dimensions()
    }

    pub fn metrics(&self) -> &GridMetrics {
        &self.metrics
    }

    pub fn size(&self) -> (u32, u32) {
        self.size
    }

    /// Rasterize `ch` into the atlas if it is not there yet
    fn ensure_glyph(&mut self, ch: char, span: u32) -> GlyphSlot {
        if let Some(slot) = self.glyph_cache.get(&ch) {
            return *slot;
        }

        let w = self.cell.width as u32 * span;
        let h = self.cell.height as u32;
        let mut bitmap = vec![0u8; (w * h) as usize];
        if !draw_box_char(&mut bitmap, ch, w, h) {
            bitmap = match self.fonts.font_for_char(ch) {
                Some(font) => rasterize_cell(font, ch, self.font_px, w, h, self.cell.baseline),
                None => missing_glyph_box(w, h),
            };
        }

        let (x, y) = match self.atlas.alloc(w, h) {
            Some(pos) => pos,
            None => {
                debug!(glyphs = self.glyph_cache.len(), "glyph atlas full, clearing");
                self.glyph_cache.clear();
                self.atlas.reset();
                self.atlas_generation += 1;
                match self.atlas.alloc(w, h) {
                    Some(pos) => pos,
                    None => return GlyphSlot::EMPTY,
                }
            }
        };

        self.queue.write_texture(
            wgpu::TexelCopyTextureInfo {
                texture: &self.glyph_atlas,
                mip_level: 0,
                origin: wgpu::Origin3d { x, y, z: 0 },
                aspect: wgpu::TextureAspect::All,
            },
            &bitmap,
            wgpu::TexelCopyBufferLayout {
                offset: 0,
                bytes_per_row: Some(w),
                rows_per_image: Some(h),
            },
            wgpu::Extent3d {
                width: w,
                height: h,
                depth_or_array_layers: 1,
            },
        );

        let atlas = ATLAS_SIZE as f32;
        let slot = GlyphSlot {
            uv: [
                x as f32 / atlas,
                y as f32 / atlas,
                w as f32 / atlas,
                h as f32 / atlas,
            ],
        };
        self.glyph_cache.insert(ch, slot);
        slot
    }

    fn build_instances(&mut self, buffer: &ScreenBuffer, palette: &Palette) -> Vec<CellInstance> {
        let width = buffer.width as usize;
        let mut instances = Vec::with_capacity(buffer.cells.len());

        for (idx, cell) in buffer.cells.iter().enumerate() {
            if cell.hidden {
                continue;
            }
            let (x, y) = (idx % width, idx / width);
            let span = utf8::char_width(cell.ch).clamp(1, 2).min(width - x) as u32;
            let glyph = if cell.ch == ' ' {
                GlyphSlot::EMPTY
            } else {
                self.ensure_glyph(cell.ch, span)
            };

            instances.push(CellInstance {
                cell_pos: [x as f32, y as f32],
                fg_color: cell.fg.to_rgba_f32(palette.fg),
                bg_color: cell.bg.to_rgba_f32(palette.bg),
                glyph_uv: glyph.uv,
                span: span as f32,
            });
        }
        instances
    }

    /// Draw `buffer` and present the frame
    pub fn render(
        &mut self,
        buffer: &ScreenBuffer,
        palette: &Palette,
    ) -> std::result::Result<(), wgpu::SurfaceError> {
        let generation = self.atlas_generation;
        let mut instances = self.build_instances(buffer, palette);
        if self.atlas_generation != generation {
            // Glyphs placed before the atlas was cleared point at stale slots
            instances = self.build_instances(buffer, palette);
        }
        if instances.is_empty() {
            return Ok(());
        }

        if instances.len() > self.instance_capacity {
            self.instance_capacity = instances.len().max(1024);
            self.instance_buffer = Some(self.device.create_buffer(&wgpu::BufferDescriptor {
                label: Some("Cell Instance Buffer"),
                size: (self.instance_capacity * std::mem::size_of::<CellInstance>()) as u64,
                usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
                mapped_at_creation: false,
            }));
        }
        let Some(instance_buffer) = self.instance_buffer.as_ref() else {
            return Ok(());
        };
        self.queue
            .write_buffer(instance_buffer, 0, bytemuck::cast_slice(&instances));

        let output = self.surface.get_current_texture()?;
        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());
        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Render Encoder"),
            });

        let [r, g, b, a] = Color::Reset.to_rgba_f32(palette.bg);
        {
            let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Grid Render Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color {
                            r: r as f64,
                            g: g as f64,
                            b: b as f64,
                            a: a as f64,
                        }),
                        store: wgpu::StoreOp::Store,
                    },
                    depth_slice: None,
                })],
                depth_stencil_attachment: None,
                occlusion_query_set: None,
                timestamp_writes: None,
            });

            render_pass.set_pipeline(&self.pipeline);
            render_pass.set_bind_group(0, &self.bind_group, &[]);
            render_pass.set_vertex_buffer(0, instance_buffer.slice(..));
            render_pass.draw(0..6, 0..instances.len() as u32);
        }

        self.queue.submit(std::iter::once(encoder.finish()));
        output.present();
        Ok(())
    }
}
