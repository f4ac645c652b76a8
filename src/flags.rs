use std::cmp::Ordering;

/// `FL` bit positions, as packed by the hardware: 0b00000LGE
pub const FLAG_L: u8 = 0b0000_0100;
pub const FLAG_G: u8 = 0b0000_0010;
pub const FLAG_E: u8 = 0b0000_0001;

/// Result of the last CMP. Only `compare` writes it; only the conditional
/// jumps read it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FlagRegister {
    less: bool,
    greater: bool,
    equal: bool,
}

impl FlagRegister {
    pub fn new() -> Self {
        Self::default()
    }

    /// sets exactly one of L, G, E
    pub fn compare(&mut self, a: u8, b: u8) {
        let ord = a.cmp(&b);
        self.less = ord == Ordering::Less;
        self.greater = ord == Ordering::Greater;
        self.equal = ord == Ordering::Equal;
    }

    pub fn is_less(&self) -> bool {
        self.less
    }

    pub fn is_greater(&self) -> bool {
        self.greater
    }

    pub fn is_equal(&self) -> bool {
        self.equal
    }

    /// packed view, for trace and the monitor
    pub fn bits(&self) -> u8 {
        let mut fl = 0;
        if self.less {
            fl |= FLAG_L;
        }
        if self.greater {
            fl |= FLAG_G;
        }
        if self.equal {
            fl |= FLAG_E;
        }
        fl
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unset_before_compare() {
        let f = FlagRegister::new();
        assert!(!f.is_less() && !f.is_greater() && !f.is_equal());
        assert_eq!(f.bits(), 0);
    }

    #[test]
    fn test_compare_less() {
        let mut f = FlagRegister::new();
        f.compare(1, 2);
        assert!(f.is_less());
        assert_eq!(f.bits(), FLAG_L);
    }

    #[test]
    fn test_compare_greater() {
        let mut f = FlagRegister::new();
        f.compare(0xff, 0);
        assert!(f.is_greater());
        assert_eq!(f.bits(), FLAG_G);
    }

    #[test]
    fn test_compare_overwrites_previous() {
        let mut f = FlagRegister::new();
        f.compare(1, 2);
        f.compare(7, 7);
        assert!(f.is_equal());
        assert!(!f.is_less());
        assert_eq!(f.bits(), FLAG_E);
    }
}
