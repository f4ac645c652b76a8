use crate::error::Fault;

// NB. addresses are usize so the PC can step past the end and be caught on
//     the next fetch, rather than silently wrapping

/// Represents the byte-addressable memory the CPU runs against
pub trait MemoryMap {
    /// total number of addressable bytes
    fn size(&self) -> usize;

    /// get a r/o slice of the underlying memory
    fn get_ro_slice(&self, addr: usize, len: usize) -> Result<&[u8], Fault>;

    /// get a r/w slice of the underlying memory
    fn get_rw_slice(&mut self, addr: usize, len: usize) -> Result<&mut [u8], Fault>;

    /// read a single byte
    fn read(&self, addr: usize) -> Result<u8, Fault> {
        Ok(self.get_ro_slice(addr, 1)?[0])
    }

    /// write a single byte
    fn write(&mut self, addr: usize, value: u8) -> Result<(), Fault> {
        self.get_rw_slice(addr, 1)?[0] = value;
        Ok(())
    }

    /// write a chunk of bytes starting at `addr`; nothing is written unless
    /// all of it fits
    fn write_slice(&mut self, data: &[u8], addr: usize) -> Result<(), Fault> {
        self.get_rw_slice(addr, data.len())?.copy_from_slice(data);
        Ok(())
    }
}

/// how much RAM we have
pub const LS8_RAM_SIZE_BYTES: usize = 256;

/// where the program is loaded
pub const LS8_PROGRAM_ADDR: usize = 0x00;

/// SP at power on; the stack grows downward from here. 0xF4..0xFF is left
/// for the machine's own use
pub const LS8_STACK_TOP: u8 = 0xf4;

/// The LS-8's flat 256 bytes of RAM, zeroed at construction
pub struct Ls8Memory {
    bytes: Box<[u8]>,
}

impl MemoryMap for Ls8Memory {
    fn size(&self) -> usize {
        self.bytes.len()
    }

    fn get_ro_slice(&self, addr: usize, len: usize) -> Result<&[u8], Fault> {
        let end = self.check_range(addr, len)?;
        Ok(&self.bytes[addr..end])
    }

    fn get_rw_slice(&mut self, addr: usize, len: usize) -> Result<&mut [u8], Fault> {
        let end = self.check_range(addr, len)?;
        Ok(&mut self.bytes[addr..end])
    }
}

impl Ls8Memory {
    pub fn new() -> Self {
        Ls8Memory {
            bytes: vec![0u8; LS8_RAM_SIZE_BYTES].into_boxed_slice(),
        }
    }

    /// load a program at address 0
    pub fn load_program(&mut self, program: &[u8]) -> Result<(), Fault> {
        self.write_slice(program, LS8_PROGRAM_ADDR)
    }

    /// the whole of memory, for snapshots
    pub fn as_slice(&self) -> &[u8] {
        &self.bytes
    }

    /// returns the exclusive end of [addr, addr+len), or the first address
    /// that falls outside memory
    fn check_range(&self, addr: usize, len: usize) -> Result<usize, Fault> {
        let size = self.bytes.len();
        if addr >= size {
            return Err(Fault::AddressOutOfRange(addr));
        }
        let end = addr.saturating_add(len);
        if end > size {
            return Err(Fault::AddressOutOfRange(size));
        }
        Ok(end)
    }
}

impl Default for Ls8Memory {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_zeroed() {
        let m = Ls8Memory::new();
        assert_eq!(m.size(), 256);
        assert_eq!(m.as_slice(), &[0u8; 256][..]);
    }

    #[test]
    fn test_read_write_ok() -> Result<(), Fault> {
        let mut m = Ls8Memory::new();
        m.write(0xff, 0x42)?;
        assert_eq!(m.read(0xff)?, 0x42);
        assert_eq!(m.read(0xfe)?, 0);
        Ok(())
    }

    #[test]
    fn test_out_of_range() {
        let mut m = Ls8Memory::new();
        assert_eq!(m.read(256), Err(Fault::AddressOutOfRange(256)));
        assert_eq!(m.write(0x1000, 1), Err(Fault::AddressOutOfRange(0x1000)));
    }

    #[test]
    fn test_write_slice_ok() -> Result<(), Fault> {
        let mut dst = Ls8Memory::new();
        let src: &[u8] = &[0, 1, 2, 3, 4, 5, 6, 7];
        dst.write_slice(src, 8)?;
        assert_eq!(
            dst.get_ro_slice(0, 16)?,
            &[0, 0, 0, 0, 0, 0, 0, 0, 0, 1, 2, 3, 4, 5, 6, 7]
        );
        Ok(())
    }

    #[test]
    fn test_write_too_much_leaves_memory_untouched() {
        let mut dst = Ls8Memory::new();
        let src: &[u8] = &[0xaa; 8];
        assert_eq!(
            dst.write_slice(src, 252),
            Err(Fault::AddressOutOfRange(256))
        );
        assert_eq!(dst.as_slice(), &[0u8; 256][..]);
    }

    #[test]
    fn test_program_load_ok() -> Result<(), Fault> {
        let mut dst = Ls8Memory::new();
        let prog: &[u8] = &[0x82, 0x00, 0x08];
        dst.load_program(prog)?;
        assert_eq!(dst.get_ro_slice(0, 3)?, &[0x82, 0x00, 0x08]);
        Ok(())
    }

    #[test]
    fn test_full_size_program_fits() -> Result<(), Fault> {
        let mut dst = Ls8Memory::new();
        dst.load_program(&[1u8; 256])?;
        assert_eq!(dst.read(255)?, 1);
        Ok(())
    }
}
