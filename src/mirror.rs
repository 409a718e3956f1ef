//! RAM copy of a small non-volatile region that can only be rewritten as a whole.

use crate::io::Storage;

/// A region of `N` bytes that is loaded once and stored in one piece, such as a flash sector.
pub trait Region<const N: usize> {
  fn load(&mut self, buf: &mut [u8; N]);

  fn store(&mut self, buf: &[u8; N]);
}

/// [`Storage`] on top of a [`Region`].
///
/// Reads are served from the mirror. A write that does not change the byte is dropped,
/// any other write stores the whole region. `N` must cover every address in use.
pub struct MirroredStorage<R, const N: usize> {
  region: R,
  bytes: [u8; N],
}

impl<R: Region<N>, const N: usize> MirroredStorage<R, N> {
  pub fn new(mut region: R) -> Self {
    let mut bytes = [0u8; N];
    region.load(&mut bytes);
    Self { region, bytes }
  }

  pub fn into_inner(self) -> R {
    self.region
  }
}

impl<R: Region<N>, const N: usize> Storage for MirroredStorage<R, N> {
  fn read_byte(&mut self, addr: u8) -> u8 {
    self.bytes[addr as usize]
  }

  fn write_byte(&mut self, addr: u8, value: u8) {
    let cell = &mut self.bytes[addr as usize];
    if *cell == value {
      return;
    }
    *cell = value;

    debug!("storing region for byte {=u8} = {=u8:#x}", addr, value);
    self.region.store(&self.bytes);
  }
}
