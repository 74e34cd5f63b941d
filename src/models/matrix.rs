/// Compact bit matrix for storing binary data
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BitMatrix {
    width: usize,
    height: usize,
    data: Vec<u8>,
}

impl BitMatrix {
    /// Create a new bit matrix with given dimensions
    pub fn new(width: usize, height: usize) -> Self {
        let bytes_needed = (width * height).div_ceil(8);
        Self {
            width,
            height,
            data: vec![0; bytes_needed],
        }
    }

    /// Get matrix width
    pub fn width(&self) -> usize {
        self.width
    }

    /// Get matrix height
    pub fn height(&self) -> usize {
        self.height
    }

    /// Get bit at (x, y)
    pub fn get(&self, x: usize, y: usize) -> bool {
        if x >= self.width || y >= self.height {
            return false;
        }
        let index = y * self.width + x;
        (self.data[index / 8] >> (index % 8)) & 1 == 1
    }

    /// Set bit at (x, y)
    pub fn set(&mut self, x: usize, y: usize, value: bool) {
        if x >= self.width || y >= self.height {
            return;
        }
        let index = y * self.width + x;
        let byte_index = index / 8;
        let bit_index = index % 8;
        if value {
            self.data[byte_index] |= 1 << bit_index;
        } else {
            self.data[byte_index] &= !(1 << bit_index);
        }
    }

    /// Count set bits
    pub fn count_ones(&self) -> usize {
        self.data.iter().map(|b| b.count_ones() as usize).sum()
    }
}


/// State of a single module during and after assembly
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Module {
    /// Not yet written
    #[default]
    Unset,
    /// Light (background) module
    Light,
    /// Dark (foreground) module
    Dark,
    /// Held for format or version information
    Reserved,
}

impl Module {
    /// Light or dark module for a bit value
    pub fn from_dark(dark: bool) -> Self {
        if dark { Module::Dark } else { Module::Light }
    }

    /// True only for [`Module::Dark`]
    pub fn is_dark(&self) -> bool {
        matches!(self, Module::Dark)
    }
}

/// Square grid of modules
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModuleMatrix {
    size: usize,
    modules: Vec<Module>,
}

impl ModuleMatrix {
    /// Create an all-[`Module::Unset`] matrix
    pub fn new(size: usize) -> Self {
        Self {
            size,
            modules: vec![Module::Unset; size * size],
        }
    }

    /// Side length in modules
    pub fn size(&self) -> usize {
        self.size
    }

    /// Module at (x, y); out-of-range reads are light
    pub fn get(&self, x: usize, y: usize) -> Module {
        if x >= self.size || y >= self.size {
            return Module::Light;
        }
        self.modules[y * self.size + x]
    }

    /// Whether the module at (x, y) is dark
    pub fn is_dark(&self, x: usize, y: usize) -> bool {
        self.get(x, y).is_dark()
    }

    /// Write a module; out-of-range writes are ignored
    pub fn set(&mut self, x: usize, y: usize, module: Module) {
        if x >= self.size || y >= self.size {
            return;
        }
        self.modules[y * self.size + x] = module;
    }

    /// Flip a light module to dark and vice versa
    pub(crate) fn invert(&mut self, x: usize, y: usize) {
        let idx = y * self.size + x;
        self.modules[idx] = match self.modules[idx] {
            Module::Light => Module::Dark,
            Module::Dark => Module::Light,
            other => other,
        };
    }

    /// Number of dark modules
    pub fn dark_count(&self) -> usize {
        self.modules.iter().filter(|m| m.is_dark()).count()
    }

    /// True once every module is either light or dark
    pub fn is_complete(&self) -> bool {
        self.modules
            .iter()
            .all(|m| matches!(m, Module::Light | Module::Dark))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bit_matrix() {
        let mut matrix = BitMatrix::new(8, 8);
        assert_eq!(matrix.width(), 8);
        assert_eq!(matrix.height(), 8);

        matrix.set(3, 4, true);
        assert!(matrix.get(3, 4));
        assert!(!matrix.get(3, 3));
        assert_eq!(matrix.count_ones(), 1);

        matrix.set(3, 4, false);
        assert!(!matrix.get(3, 4));
        assert_eq!(matrix.count_ones(), 0);
    }

    #[test]
    fn test_out_of_bounds() {
        let mut matrix = BitMatrix::new(8, 8);
        matrix.set(10, 10, true); // Should not panic
        assert!(!matrix.get(10, 10));
    }

    #[test]
    fn test_module_matrix_states() {
        let mut matrix = ModuleMatrix::new(21);
        assert!(!matrix.is_complete());
        matrix.set(0, 0, Module::Dark);
        matrix.set(1, 0, Module::Reserved);
        matrix.invert(0, 0);
        matrix.invert(1, 0);
        assert_eq!(matrix.get(0, 0), Module::Light);
        assert_eq!(matrix.get(1, 0), Module::Reserved);
        assert_eq!(matrix.get(30, 30), Module::Light);
    }
}
