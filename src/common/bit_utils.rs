use std::fmt::Display;
use std::mem;

use num_traits::PrimInt;

// Bit stream
//------------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct BitStream {
    data: Vec<u8>,
    // Bit length
    len: usize,
}

impl BitStream {
    pub fn with_capacity(bit_capacity: usize) -> Self {
        Self { data: Vec::with_capacity((bit_capacity + 7) >> 3), len: 0 }
    }

    pub fn from(inp: &[u8]) -> Self {
        Self { data: inp.to_vec(), len: inp.len() << 3 }
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn into_codewords(self) -> Vec<u8> {
        self.data
    }

    pub fn get(&self, pos: usize) -> Option<bool> {
        if pos >= self.len {
            return None;
        }
        Some(self.data[pos >> 3] & (0b10000000 >> (pos & 7)) != 0)
    }

    pub fn iter(&self) -> impl Iterator<Item = bool> + '_ {
        (0..self.len).filter_map(move |i| self.get(i))
    }
}

// Push bits for bit stream
//------------------------------------------------------------------------------

impl BitStream {
    // Pushes the lowest `size` bits of `bits`, most significant first
    pub fn push_bits<T>(&mut self, bits: T, size: usize)
    where
        T: PrimInt + Display,
    {
        let max_bits = mem::size_of::<T>() * 8;
        debug_assert!(size <= max_bits, "Bit count exceeds type width: Size {size}");
        debug_assert!(
            size >= max_bits - bits.leading_zeros() as usize,
            "Bit count shouldn't exceed bit length: Length {size}, Bits {bits}"
        );

        for i in (0..size).rev() {
            self.push((bits >> i) & T::one() == T::one());
        }
    }

    pub fn push(&mut self, bit: bool) {
        let offset = self.len & 7;
        if offset == 0 {
            self.data.push(0);
        }
        if bit {
            let pos = self.len >> 3;
            self.data[pos] |= 0b10000000 >> offset;
        }
        self.len += 1;
    }
}

#[cfg(test)]
impl BitStream {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }
}
