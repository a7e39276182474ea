use cust::error::CudaError;
use cust::memory::DeviceBuffer;
use cust::{module, prelude::*, stream, util::SliceExt};
use meshmirror::{ArenaError, DeviceCopy, Domain, DomainMirror, RemoteArena, RemoteSlice};

use std::any::Any;
use std::error::Error;
use std::num::NonZeroUsize;

static PTX: &str = include_str!(concat!(env!("OUT_DIR"), "/kernels.ptx"));

/// This caches all of the information needed to execute a cuda kernel
/// (this may not be an optimal abstraction)
///
/// Construct it before building any [`CudaArena`]-backed mirror: the
/// context it holds alive is what makes the arena's device allocations
/// valid.
pub struct ExecContext {
    stream: stream::Stream,
    module: module::Module,
    // We don't need the context for anything but it must be kept alive.
    _context: Context,
}

impl ExecContext {
    pub fn new() -> Result<ExecContext, Box<dyn Error>> {
        let context = cust::quick_init()?;

        Ok(ExecContext {
            // make a CUDA stream to issue calls to
            stream: Stream::new(StreamFlags::NON_BLOCKING, None)?,
            // Make the CUDA module (a module holds the GPU code for the
            // kernels) they can be made from PTX code, cubins, or fatbins.
            module: Module::from_ptx(PTX, &[])?,
            _context: context,
        })
    }
}

/// A [`RemoteArena`] backed by CUDA device memory.
///
/// Every reservation is one `DeviceBuffer`; the arena keeps the buffers
/// alive, so dropping the arena (or the mirror that owns it) frees all of
/// the mirror's device memory in one go.
#[derive(Default)]
pub struct CudaArena {
    buffers: Vec<Box<dyn Any>>,
}

impl CudaArena {
    pub fn new() -> Self {
        CudaArena {
            buffers: Vec::new(),
        }
    }
}

impl RemoteArena for CudaArena {
    fn reserve_from_slice<T: DeviceCopy + Copy + 'static>(
        &mut self,
        src: &[T],
    ) -> Result<RemoteSlice<T>, ArenaError> {
        if src.is_empty() {
            return Ok(RemoteSlice::empty());
        }
        // allocates on the device and copies src over in one call
        let buf = DeviceBuffer::from_slice(src).map_err(|e| match e {
            CudaError::OutOfMemory => ArenaError::alloc(size_of::<T>(), src.len()),
            _ => ArenaError::transfer(size_of::<T>(), src.len()),
        })?;
        let handle =
            RemoteSlice::from_raw_parts(buf.as_device_ptr().as_raw() as usize as *const T, src.len());
        self.buffers.push(Box::new(buf));
        Ok(handle)
    }
}

/// build the device mirror of `domains` in a fresh [`CudaArena`]
pub fn mirror_to_device(
    domains: &[Domain],
    num_energy_groups: NonZeroUsize,
) -> Result<DomainMirror<CudaArena>, meshmirror::Error> {
    DomainMirror::build(CudaArena::new(), domains, num_energy_groups)
}

/// Launch the `cell_total_sums` kernel on one mirrored domain and copy the
/// per-cell sums back.
pub fn exec_cell_total_sums(
    exec_context: &ExecContext,
    mirror: &DomainMirror<CudaArena>,
    domain_idx: usize,
    n_cells: usize,
) -> Result<Vec<f64>, Box<dyn Error>> {
    // allocate our output buffer. You could also use DeviceBuffer::uninitialized() to avoid the
    // cost of the copy, but you need to be careful not to read from the buffer.
    let mut out = vec![0.0f64; n_cells];
    let out_buf = out.as_slice().as_dbuf()?;

    let kernel = exec_context.module.get_function("cell_total_sums")?;

    // use the CUDA occupancy API to find an optimal launch configuration for the grid and block size.
    let (_, block_size) = kernel.suggested_launch_configuration(0, 0.into())?;
    let grid_size = (n_cells as u32).div_ceil(block_size);

    let stream = &exec_context.stream;
    unsafe {
        launch!(
            // the descriptor handle is plain data; the kernel walks the
            // nested device addresses on its own from there
            kernel<<<grid_size, block_size, 0, stream>>>(
                mirror.domains(),
                domain_idx,
                out_buf.as_device_ptr(),
            )
        )?;
    }

    stream.synchronize()?;

    // copy back the data from the GPU.
    out_buf.copy_to(&mut out)?;
    Ok(out)
}

/// Launch the `cell_facet_counts` kernel on one mirrored domain and copy
/// the per-cell facet counts back.
pub fn exec_cell_facet_counts(
    exec_context: &ExecContext,
    mirror: &DomainMirror<CudaArena>,
    domain_idx: usize,
    n_cells: usize,
) -> Result<Vec<u32>, Box<dyn Error>> {
    let mut out = vec![0u32; n_cells];
    let out_buf = out.as_slice().as_dbuf()?;

    let kernel = exec_context.module.get_function("cell_facet_counts")?;
    let (_, block_size) = kernel.suggested_launch_configuration(0, 0.into())?;
    let grid_size = (n_cells as u32).div_ceil(block_size);

    let stream = &exec_context.stream;
    unsafe {
        launch!(
            kernel<<<grid_size, block_size, 0, stream>>>(
                mirror.domains(),
                domain_idx,
                out_buf.as_device_ptr(),
            )
        )?;
    }

    stream.synchronize()?;

    out_buf.copy_to(&mut out)?;
    Ok(out)
}
