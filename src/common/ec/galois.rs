use std::sync::{Arc, OnceLock};

use crate::common::error::{QRError, QRResult};

// Primitive polynomial of GF(256) used by QR
pub const QR_POLY: u32 = 0x11d;

// Galois field GF(2^m) with log and antilog tables
//------------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GaloisField {
    poly: u32,
    // Size of the multiplicative group, 2^m - 1
    order: usize,
    // Doubled so that sums of two logs never need a modulo
    exp: Vec<u8>,
    log: Vec<usize>,
}

impl GaloisField {
    /// Builds GF(2^m) from a primitive polynomial of degree m, 2 <= m <= 8.
    pub fn new(poly: u32) -> QRResult<Self> {
        let degree = u32::BITS.saturating_sub(poly.leading_zeros() + 1) as usize;
        if !(2..=8).contains(&degree) || poly & 1 == 0 {
            return Err(QRError::InvalidCodecConfig);
        }

        let field = Self::build(poly, degree);

        // α must generate every non-zero element exactly once
        let is_primitive =
            (0..field.order).all(|i| field.exp[i] != 0 && field.log[field.exp[i] as usize] == i);
        if !is_primitive {
            return Err(QRError::InvalidCodecConfig);
        }
        Ok(field)
    }

    fn build(poly: u32, degree: usize) -> Self {
        let order = (1 << degree) - 1;
        let mut exp = vec![0; order * 2];
        let mut log = vec![0; order + 1];

        let mut x = 1u32;
        for i in 0..order {
            exp[i] = x as u8;
            log[x as usize] = i;
            x <<= 1;
            if x & (1 << degree) != 0 {
                x ^= poly;
            }
        }
        exp.copy_within(0..order, order);

        Self { poly, order, exp, log }
    }

    /// Shared GF(256) instance for QR, built once.
    pub fn qr() -> Arc<Self> {
        static QR_FIELD: OnceLock<Arc<GaloisField>> = OnceLock::new();
        QR_FIELD.get_or_init(|| Arc::new(Self::build(QR_POLY, 8))).clone()
    }

    pub fn poly(&self) -> u32 {
        self.poly
    }

    pub fn order(&self) -> usize {
        self.order
    }

    // Number of field elements, 2^m
    pub fn size(&self) -> usize {
        self.order + 1
    }

    // α^i
    pub fn exp(&self, i: usize) -> u8 {
        self.exp[i % self.order]
    }

    pub fn log(&self, x: u8) -> usize {
        debug_assert!(x != 0, "Log of zero is undefined");
        self.log[x as usize]
    }

    pub fn mul(&self, a: u8, b: u8) -> u8 {
        if a == 0 || b == 0 {
            return 0;
        }
        self.exp[self.log[a as usize] + self.log[b as usize]]
    }
}
