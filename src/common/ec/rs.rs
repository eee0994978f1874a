use std::sync::Arc;

use super::galois::GaloisField;
use crate::common::error::{QRError, QRResult};

// Reed-Solomon encoder
//------------------------------------------------------------------------------

/// Systematic Reed-Solomon encoder over GF(2^m).
///
/// The generator polynomial is the product of (x - α^(fcr + i)) for i in 0..nsym.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReedSolomon {
    field: Arc<GaloisField>,
    fcr: usize,
    // Coefficient of x^i at index i, monic
    generator: Vec<u8>,
}

impl ReedSolomon {
    pub fn new(poly: u32, nsym: usize, fcr: usize) -> QRResult<Self> {
        let field = Arc::new(GaloisField::new(poly)?);
        Self::with_field(field, nsym, fcr)
    }

    pub fn with_field(field: Arc<GaloisField>, nsym: usize, fcr: usize) -> QRResult<Self> {
        if nsym == 0 || nsym >= field.order() {
            return Err(QRError::InvalidCodecConfig);
        }

        let mut generator = vec![0u8; nsym + 1];
        generator[0] = 1;
        for i in 0..nsym {
            let root = field.exp(fcr + i);
            for j in (1..=i + 1).rev() {
                generator[j] = generator[j - 1] ^ field.mul(generator[j], root);
            }
            generator[0] = field.mul(generator[0], root);
        }

        Ok(Self { field, fcr, generator })
    }

    /// QR codes: GF(256) over 0x11d, first root α^0.
    pub fn qr(nsym: usize) -> QRResult<Self> {
        Self::with_field(GaloisField::qr(), nsym, 0)
    }

    /// Data Matrix: GF(256) over 0x12d, first root α^1.
    pub fn data_matrix(nsym: usize) -> QRResult<Self> {
        Self::new(0x12d, nsym, 1)
    }

    /// Australia Post 4-state: GF(64) over 0x43, first root α^1.
    pub fn australia_post(nsym: usize) -> QRResult<Self> {
        Self::new(0x43, nsym, 1)
    }

    pub fn field(&self) -> &GaloisField {
        &self.field
    }

    pub fn nsym(&self) -> usize {
        self.generator.len() - 1
    }

    pub fn fcr(&self) -> usize {
        self.fcr
    }

    pub fn generator(&self) -> &[u8] {
        &self.generator
    }

    /// Computes the remainder of `data(x) * x^nsym` divided by the generator. `data[0]` is
    /// the highest order coefficient; in the returned parity the coefficient of x^i is at
    /// index i, so transmission order is the reverse.
    pub fn encode(&self, data: &[u8]) -> QRResult<Vec<u8>> {
        let nsym = self.nsym();
        let mut res = vec![0u8; nsym];
        for &d in data {
            if d as usize >= self.field.size() {
                return Err(QRError::InvalidCodecConfig);
            }
            let feedback = d ^ res[nsym - 1];
            for k in (1..nsym).rev() {
                res[k] = res[k - 1] ^ self.field.mul(feedback, self.generator[k]);
            }
            res[0] = self.field.mul(feedback, self.generator[0]);
        }
        Ok(res)
    }
}

#[cfg(test)]
mod rs_tests {
    use proptest::prelude::*;
    use test_case::test_case;

    use super::ReedSolomon;
    use crate::common::error::QRError;

    fn parity(data: &[u8], nsym: usize) -> Vec<u8> {
        let mut res = ReedSolomon::qr(nsym).unwrap().encode(data).unwrap();
        res.reverse();
        res
    }

    // Evaluates data followed by parity, in transmission order, at x
    fn eval_codeword(rs: &ReedSolomon, data: &[u8], parity: &[u8], x: u8) -> u8 {
        let gf = rs.field();
        data.iter().chain(parity.iter().rev()).fold(0, |acc, &c| gf.mul(acc, x) ^ c)
    }

    #[test]
    fn test_parity_1() {
        let res = parity(b" [\x0bx\xd1r\xdcMC@\xec\x11\xec\x11\xec\x11", 10);
        assert_eq!(&*res, b"\xc4#'w\xeb\xd7\xe7\xe2]\x17");
    }

    #[test]
    fn test_parity_2() {
        let res = parity(b" [\x0bx\xd1r\xdcMC@\xec\x11\xec", 13);
        assert_eq!(&*res, b"\xa8H\x16R\xd96\x9c\x00.\x0f\xb4z\x10");
    }

    #[test]
    fn test_parity_3() {
        let res = parity(b"CUF\x86W&U\xc2w2\x06\x12\x06g&", 18);
        assert_eq!(&*res, b"\xd5\xc7\x0b-s\xf7\xf1\xdf\xe5\xf8\x9au\x9aoV\xa1o'");
    }

    #[test]
    fn test_generator_degree_2() {
        // (x - 1)(x - α) = x^2 + 3x + 2
        let rs = ReedSolomon::qr(2).unwrap();
        assert_eq!(rs.generator(), [2, 3, 1]);
    }

    #[test]
    fn test_message_is_unchanged() {
        let data = b"HELLO".to_vec();
        let rs = ReedSolomon::data_matrix(5).unwrap();
        let _ = rs.encode(&data).unwrap();
        assert_eq!(data, b"HELLO");
    }

    #[test_case(0)]
    #[test_case(255)]
    fn test_invalid_nsym(nsym: usize) {
        assert_eq!(ReedSolomon::qr(nsym), Err(QRError::InvalidCodecConfig));
    }

    #[test]
    fn test_symbol_outside_field() {
        let rs = ReedSolomon::australia_post(4).unwrap();
        assert!(rs.encode(&[1, 63, 0]).is_ok());
        assert_eq!(rs.encode(&[1, 64]), Err(QRError::InvalidCodecConfig));
    }

    #[test]
    fn test_empty_message() {
        let rs = ReedSolomon::qr(7).unwrap();
        assert_eq!(rs.encode(&[]).unwrap(), vec![0; 7]);
    }

    proptest! {
        #[test]
        fn proptest_codeword_vanishes_at_roots(
            data in prop::collection::vec(any::<u8>(), 1..200),
            nsym in 1usize..40,
            preset in 0usize..3,
        ) {
            let rs = match preset {
                0 => ReedSolomon::qr(nsym).unwrap(),
                1 => ReedSolomon::data_matrix(nsym).unwrap(),
                _ => ReedSolomon::australia_post(nsym).unwrap(),
            };
            let data = data.into_iter().map(|d| d & (rs.field().order() as u8)).collect::<Vec<_>>();
            let parity = rs.encode(&data).unwrap();
            prop_assert_eq!(parity.len(), nsym);
            for i in 0..nsym {
                let root = rs.field().exp(rs.fcr() + i);
                prop_assert_eq!(eval_codeword(&rs, &data, &parity, root), 0);
            }
        }
    }
}
