mod qr;

pub use qr::{Module, ModuleKind, QR};

use log::{debug, log, Level};

use crate::common::{
    codec::{self, EncodedData},
    ec::{ecc, interleave_blocks, Block},
    error::{QRError, QRResult},
    mask::apply_best_mask,
    metadata::{ECLevel, Version},
    symbol::Symbol,
};

#[derive(Debug, Clone)]
pub struct QRBuilder<'a> {
    data: &'a str,
    version: Option<Version>,
    ec_level: ECLevel,
    gs1: bool,
    reader_init: bool,
    debug: bool,
}

impl<'a> QRBuilder<'a> {
    pub fn new(data: &'a str) -> Self {
        Self {
            data,
            version: None,
            ec_level: ECLevel::L,
            gs1: false,
            reader_init: false,
            debug: false,
        }
    }

    pub fn data(&mut self, data: &'a str) -> &mut Self {
        self.data = data;
        self
    }

    /// Smallest version to use. A version too small for the data is ignored.
    pub fn version(&mut self, version: Version) -> &mut Self {
        self.version = Some(version);
        self
    }

    /// Same as [`QRBuilder::version`] with a raw number; 0 or anything above 40 picks
    /// automatically.
    pub fn forced_version(&mut self, version: u8) -> &mut Self {
        self.version = Version::new(version as usize).ok();
        self
    }

    pub fn unset_version(&mut self) -> &mut Self {
        self.version = None;
        self
    }

    /// Minimum error correction level. It is raised when the chosen version has room.
    pub fn ec_level(&mut self, ec_level: ECLevel) -> &mut Self {
        self.ec_level = ec_level;
        self
    }

    /// Numeric form of [`QRBuilder::ec_level`]: 1 to 4 for L, M, Q, H.
    pub fn ec_option(&mut self, option: u8) -> &mut Self {
        self.ec_level = ECLevel::from_option(option);
        self
    }

    /// Treats `[` as FNC1 and prefixes the stream with the GS1 mode indicator.
    pub fn gs1(&mut self, gs1: bool) -> &mut Self {
        self.gs1 = gs1;
        self
    }

    pub fn reader_init(&mut self, reader_init: bool) -> &mut Self {
        self.reader_init = reader_init;
        self
    }

    /// Logs the mode map and codeword dumps at debug level instead of trace.
    pub fn debug(&mut self, debug: bool) -> &mut Self {
        self.debug = debug;
        self
    }

    pub fn metadata(&self) -> String {
        let version = self.version.map_or_else(|| "None".to_string(), |v| v.to_string());
        format!(
            "{{ Version: {version}, Ec level: {:?}, GS1: {}, Reader init: {} }}",
            self.ec_level, self.gs1, self.reader_init
        )
    }
}


impl QRBuilder<'_> {
    pub fn build(&self) -> QRResult<QR> {
        debug!("Generating QR {}...", self.metadata());
        if self.gs1 && self.reader_init {
            return Err(QRError::ConflictingOptions);
        }

        let content = self.data.chars().collect::<Vec<_>>();
        let encoded = codec::encode(&content, self.gs1, self.ec_level, self.version)?;
        let EncodedData { version, ec_level, .. } = encoded;
        debug!("Selected version {version} at ec level {ec_level}");
        self.dump_codewords(&encoded);

        let blocks = ecc(&encoded.codewords, version, ec_level)?;
        self.dump_blocks(&blocks);
        let payload = interleave_blocks(&blocks);
        log!(self.dump_level(), "Data stream: {}", hex(&payload));

        let mut qr = QR::new(version, ec_level);
        qr.draw_all_function_patterns();
        qr.draw_encoding_region(&payload)?;

        let mask = apply_best_mask(&mut qr);
        debug!("Applied mask {mask}");
        qr.draw_format_info();
        qr.draw_version_info();

        Ok(qr)
    }

    pub fn encode(&self) -> QRResult<Symbol> {
        self.build().map(|qr| qr.to_symbol())
    }

    fn dump_level(&self) -> Level {
        if self.debug {
            Level::Debug
        } else {
            Level::Trace
        }
    }

    fn dump_codewords(&self, encoded: &EncodedData) {
        let level = self.dump_level();
        log!(level, "Mode map: {}", encoded.mode_map());
        for seg in &encoded.segments {
            log!(level, "Segment {} at {}, length {}", seg.mode, seg.start, seg.len);
        }
        log!(level, "Resulting codewords: {}", hex(&encoded.codewords));
    }

    fn dump_blocks(&self, blocks: &[Block]) {
        let level = self.dump_level();
        for (i, b) in blocks.iter().enumerate() {
            log!(level, "Block {}: {} // {}", i + 1, hex(b.data), hex(&b.ecc));
        }
    }
}

fn hex(bytes: &[u8]) -> String {
    bytes.iter().map(|b| format!("{b:02X}")).collect::<Vec<_>>().join(" ")
}
