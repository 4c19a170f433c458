/// Implement the shared constructors, accessors and `core::ops` traits of a
/// residue type wrapping a reduced [`BigUint`](num_bigint::BigUint).
///
/// `$modulus` is a function returning the modulus the type is reduced by.
macro_rules! impl_modular_ops {
    ($name:ident, $modulus:path, $desc:expr) => {
        impl $name {
            #[doc = concat!("Additive identity of the ", $desc, ".")]
            pub fn zero() -> Self {
                Self(num_bigint::BigUint::default())
            }

            #[doc = concat!("Multiplicative identity of the ", $desc, ".")]
            pub fn one() -> Self {
                Self(num_bigint::BigUint::from(1u32))
            }

            #[doc = concat!("Reduce an arbitrary integer into the ", $desc, ".")]
            pub fn from_uint_reduced(value: num_bigint::BigUint) -> Self {
                Self(value % $modulus())
            }

            /// Decode 32 big-endian bytes, failing when the value is not
            /// below the modulus.
            pub fn from_bytes(bytes: &$crate::FieldBytes) -> $crate::Result<Self> {
                let value = num_bigint::BigUint::from_bytes_be(bytes);
                if &value < $modulus() {
                    Ok(Self(value))
                } else {
                    Err($crate::Error::InvalidCurveInput)
                }
            }

            /// Decode a 32-byte big-endian slice, see [`Self::from_bytes`].
            pub fn from_slice(slice: &[u8]) -> $crate::Result<Self> {
                let bytes = <&$crate::FieldBytes>::try_from(slice)
                    .map_err(|_| $crate::Error::InvalidCurveInput)?;
                Self::from_bytes(bytes)
            }

            /// Encode as 32 big-endian bytes.
            pub fn to_bytes(&self) -> $crate::FieldBytes {
                $crate::arithmetic::modular::to_fixed_bytes(&self.0)
            }

            /// Borrow the reduced integer value.
            pub fn as_uint(&self) -> &num_bigint::BigUint {
                &self.0
            }

            /// Is this element zero?
            pub fn is_zero(&self) -> bool {
                num_traits::Zero::is_zero(&self.0)
            }

            /// Compute `2 · self`.
            #[must_use]
            pub fn double(&self) -> Self {
                Self($crate::arithmetic::modular::add(&self.0, &self.0, $modulus()))
            }

            /// Compute `self²`.
            #[must_use]
            pub fn square(&self) -> Self {
                Self($crate::arithmetic::modular::mul(&self.0, &self.0, $modulus()))
            }

            /// Compute `self^exp`.
            #[must_use]
            pub fn pow(&self, exp: &num_bigint::BigUint) -> Self {
                Self($crate::arithmetic::modular::pow(&self.0, exp, $modulus()))
            }

            /// Multiplicative inverse, `None` for zero.
            pub fn invert(&self) -> Option<Self> {
                $crate::arithmetic::modular::inverse(&self.0, $modulus()).map(Self)
            }
        }

        impl core::fmt::Debug for $name {
            fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
                write!(f, "{}(0x", stringify!($name))?;
                for byte in self.to_bytes() {
                    write!(f, "{:02x}", byte)?;
                }
                write!(f, ")")
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::zero()
            }
        }

        impl_modular_binop!($name, Add, add, $crate::arithmetic::modular::add, $modulus);
        impl_modular_binop!($name, Sub, sub, $crate::arithmetic::modular::sub, $modulus);
        impl_modular_binop!($name, Mul, mul, $crate::arithmetic::modular::mul, $modulus);

        impl core::ops::Neg for &$name {
            type Output = $name;

            fn neg(self) -> $name {
                $name($crate::arithmetic::modular::neg(&self.0, $modulus()))
            }
        }

        impl core::ops::Neg for $name {
            type Output = $name;

            fn neg(self) -> $name {
                -&self
            }
        }
    };
}

/// Implement a binary operator for every owned/borrowed operand combination.
macro_rules! impl_modular_binop {
    ($name:ident, $trait:ident, $method:ident, $op:path, $modulus:path) => {
        impl core::ops::$trait<&$name> for &$name {
            type Output = $name;

            fn $method(self, rhs: &$name) -> $name {
                $name($op(&self.0, &rhs.0, $modulus()))
            }
        }

        impl core::ops::$trait<&$name> for $name {
            type Output = $name;

            fn $method(self, rhs: &$name) -> $name {
                core::ops::$trait::$method(&self, rhs)
            }
        }

        impl core::ops::$trait<$name> for &$name {
            type Output = $name;

            fn $method(self, rhs: $name) -> $name {
                core::ops::$trait::$method(self, &rhs)
            }
        }

        impl core::ops::$trait<$name> for $name {
            type Output = $name;

            fn $method(self, rhs: $name) -> $name {
                core::ops::$trait::$method(&self, &rhs)
            }
        }
    };
}
