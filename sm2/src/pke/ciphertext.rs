//! SM2 ciphertext `(C1, C2, C3)` and its encodings.

use super::{Encoding, EncryptionOptions, Mode};
use crate::{AffinePoint, Error, FIELD_SIZE, FieldBytes, Hash, Result, UNCOMPRESSED_POINT_SIZE};
use alloc::vec::Vec;
use der::{
    Decode, DecodeValue, Encode, EncodeValue, Header, Length, Reader, Sequence, Writer,
    asn1::{OctetStringRef, UintRef},
};
use gm_sm3::OUTPUT_SIZE;

/// Smallest plain encoding: `C1` and `C3` with an empty `C2`.
const MIN_PLAIN_LEN: usize = UNCOMPRESSED_POINT_SIZE + OUTPUT_SIZE;

/// SM2 ciphertext.
///
/// - `C1 = [k]G`, the ephemeral public point
/// - `C2 = M ⊕ KDF(x2 ‖ y2, klen)`, as long as the message
/// - `C3 = SM3(x2 ‖ M ‖ y2)`
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Ciphertext {
    c1: AffinePoint,
    c2: Vec<u8>,
    c3: Hash,
}

impl Ciphertext {
    /// Assemble a ciphertext from its components.
    ///
    /// Fails with [`Error::InvalidCiphertext`] when `c1` is the identity.
    pub fn new(c1: AffinePoint, c2: Vec<u8>, c3: Hash) -> Result<Self> {
        if c1.is_identity() {
            return Err(Error::InvalidCiphertext);
        }

        Ok(Self { c1, c2, c3 })
    }

    /// Ephemeral point `C1`.
    pub fn c1(&self) -> &AffinePoint {
        &self.c1
    }

    /// Masked message `C2`.
    pub fn c2(&self) -> &[u8] {
        &self.c2
    }

    /// Integrity hash `C3`.
    pub fn c3(&self) -> &Hash {
        &self.c3
    }

    /// Decode a plain ciphertext `04 ‖ x1 ‖ y1 ‖ …` in the given component
    /// order.
    pub fn from_bytes(bytes: &[u8], mode: Mode) -> Result<Self> {
        if bytes.len() < MIN_PLAIN_LEN {
            return Err(Error::InvalidCiphertext);
        }

        let (c1, rest) = bytes.split_at(UNCOMPRESSED_POINT_SIZE);
        let c1 = AffinePoint::from_uncompressed(c1).map_err(|_| Error::InvalidCiphertext)?;

        let (c2, c3) = match mode {
            Mode::C1C3C2 => {
                let (c3, c2) = rest.split_at(OUTPUT_SIZE);
                (c2, c3)
            }
            Mode::C1C2C3 => rest.split_at(rest.len() - OUTPUT_SIZE),
        };

        Self::new(c1, c2.to_vec(), to_hash(c3)?)
    }

    /// Encode as a plain ciphertext in the given component order.
    pub fn to_bytes(&self, mode: Mode) -> Result<Vec<u8>> {
        let c1 = self
            .c1
            .to_uncompressed()
            .map_err(|_| Error::InvalidCiphertext)?;

        let mut out = Vec::with_capacity(MIN_PLAIN_LEN + self.c2.len());
        out.extend_from_slice(&c1);
        match mode {
            Mode::C1C2C3 => {
                out.extend_from_slice(&self.c2);
                out.extend_from_slice(&self.c3);
            }
            Mode::C1C3C2 => {
                out.extend_from_slice(&self.c3);
                out.extend_from_slice(&self.c2);
            }
        }
        Ok(out)
    }

    /// Decode an ASN.1 DER ciphertext.
    pub fn from_der(bytes: &[u8]) -> Result<Self> {
        let CiphertextRef { x, y, digest, cipher } =
            CiphertextRef::from_der(bytes).map_err(|_| Error::InvalidCiphertext)?;

        let c1 = AffinePoint::from_coordinates(
            &left_pad(x.as_bytes())?,
            &left_pad(y.as_bytes())?,
        )
        .map_err(|_| Error::InvalidCiphertext)?;

        Self::new(c1, cipher.as_bytes().to_vec(), to_hash(digest.as_bytes())?)
    }

    /// Encode as an ASN.1 DER ciphertext.
    pub fn to_der(&self) -> Result<Vec<u8>> {
        let x = self.c1.x().to_bytes();
        let y = self.c1.y().to_bytes();
        let encode = || -> der::Result<Vec<u8>> {
            CiphertextRef {
                x: UintRef::new(&x)?,
                y: UintRef::new(&y)?,
                digest: OctetStringRef::new(&self.c3)?,
                cipher: OctetStringRef::new(&self.c2)?,
            }
            .to_der()
        };
        encode().map_err(|_| Error::InvalidCiphertext)
    }

    /// Decode according to `options`.
    pub fn decode(bytes: &[u8], options: EncryptionOptions) -> Result<Self> {
        match options.encoding {
            Encoding::Plain => Self::from_bytes(bytes, options.mode),
            Encoding::Asn1 => Self::from_der(bytes),
        }
    }

    /// Encode according to `options`.
    pub fn encode(&self, options: EncryptionOptions) -> Result<Vec<u8>> {
        match options.encoding {
            Encoding::Plain => self.to_bytes(options.mode),
            Encoding::Asn1 => self.to_der(),
        }
    }
}

fn to_hash(bytes: &[u8]) -> Result<Hash> {
    Hash::try_from(bytes).map_err(|_| Error::InvalidCiphertext)
}

fn left_pad(bytes: &[u8]) -> Result<FieldBytes> {
    if bytes.len() > FIELD_SIZE {
        return Err(Error::InvalidCiphertext);
    }

    let mut out = FieldBytes::default();
    out[FIELD_SIZE - bytes.len()..].copy_from_slice(bytes);
    Ok(out)
}

struct CiphertextRef<'a> {
    x: UintRef<'a>,
    y: UintRef<'a>,
    digest: OctetStringRef<'a>,
    cipher: OctetStringRef<'a>,
}

impl EncodeValue for CiphertextRef<'_> {
    fn value_len(&self) -> der::Result<Length> {
        self.x.encoded_len()?
            + self.y.encoded_len()?
            + self.digest.encoded_len()?
            + self.cipher.encoded_len()?
    }

    fn encode_value(&self, encoder: &mut impl Writer) -> der::Result<()> {
        self.x.encode(encoder)?;
        self.y.encode(encoder)?;
        self.digest.encode(encoder)?;
        self.cipher.encode(encoder)?;
        Ok(())
    }
}

impl<'a> DecodeValue<'a> for CiphertextRef<'a> {
    fn decode_value<R: Reader<'a>>(reader: &mut R, _header: Header) -> der::Result<Self> {
        Ok(Self {
            x: UintRef::decode(reader)?,
            y: UintRef::decode(reader)?,
            digest: OctetStringRef::decode(reader)?,
            cipher: OctetStringRef::decode(reader)?,
        })
    }
}

impl<'a> Sequence<'a> for CiphertextRef<'a> {}
