use crate::error::{Error, ErrorKind, ErrorOrigin, Result};
use crate::types::{umem, FrameId};

/// Physical memory of the simulation.
///
/// The store owns a fixed number of frame slots. A slot is filled once with the
/// contents of a page and is never evicted or overwritten afterwards.
pub struct FrameStore {
    frames: Box<[Option<Box<[u8]>>]>,
    frame_size: usize,
    loaded: usize,
}

impl FrameStore {
    pub fn new(frame_count: usize, frame_size: usize) -> Self {
        Self {
            frames: vec![None; frame_count].into_boxed_slice(),
            frame_size,
            loaded: 0,
        }
    }

    /// Copies `data` into the slot of `frame` unless the slot already holds a page.
    ///
    /// Returns `true` if the frame was loaded by this call.
    pub fn load_if_absent(&mut self, frame: FrameId, data: &[u8]) -> Result<bool> {
        if data.len() != self.frame_size {
            return Err(
                Error(ErrorOrigin::FrameStore, ErrorKind::InvalidMemorySize).log_error(format!(
                    "frame {} expects {} bytes, got {}",
                    frame,
                    self.frame_size,
                    data.len()
                )),
            );
        }

        let slot = self.slot_mut(frame)?;
        if slot.is_some() {
            return Ok(false);
        }

        *slot = Some(data.to_vec().into_boxed_slice());
        self.loaded += 1;
        Ok(true)
    }

    /// Reads the byte at `offset` of a loaded frame.
    pub fn read_byte(&self, frame: FrameId, offset: umem) -> Result<u8> {
        let data = self.frame(frame).ok_or_else(|| {
            Error(ErrorOrigin::FrameStore, ErrorKind::FrameNotLoaded)
                .log_error(format!("frame {} was read before it was loaded", frame))
        })?;

        data.get(offset as usize).copied().ok_or_else(|| {
            Error(ErrorOrigin::FrameStore, ErrorKind::OutOfBounds).log_error(format!(
                "offset {} is outside of frame {} ({} bytes)",
                offset, frame, self.frame_size
            ))
        })
    }

    /// Returns the contents of `frame` if it is loaded.
    pub fn frame(&self, frame: FrameId) -> Option<&[u8]> {
        self.frames
            .get(frame.as_usize())
            .and_then(|slot| slot.as_deref())
    }

    pub fn is_loaded(&self, frame: FrameId) -> bool {
        self.frame(frame).is_some()
    }

    pub fn loaded_count(&self) -> usize {
        self.loaded
    }

    pub fn capacity(&self) -> usize {
        self.frames.len()
    }

    pub fn frame_size(&self) -> usize {
        self.frame_size
    }

    fn slot_mut(&mut self, frame: FrameId) -> Result<&mut Option<Box<[u8]>>> {
        let capacity = self.frames.len();
        self.frames.get_mut(frame.as_usize()).ok_or_else(|| {
            Error(ErrorOrigin::FrameStore, ErrorKind::OutOfBounds).log_error(format!(
                "frame {} is outside of the store ({} frames)",
                frame, capacity
            ))
        })
    }
}
