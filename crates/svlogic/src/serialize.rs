//! String-form serde support: values travel as sized SV literals
//! (`"8'hff"`, `"4'b10xz"`).

use std::fmt;
use std::marker::PhantomData;
use std::str::FromStr;

use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::bit::Bit;
use crate::literal::{FormatSpec, Radix};
use crate::logic::Logic;

impl<const MSB: usize, const LSB: usize, const SIGNED: bool, const LIMBS: usize> Serialize
    for Bit<MSB, LSB, SIGNED, LIMBS>
{
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let digits = self.format_with(FormatSpec::new(Radix::Hex));
        serializer.serialize_str(&format!("{}'h{digits}", Self::WIDTH))
    }
}

impl<const MSB: usize, const LSB: usize, const SIGNED: bool, const LIMBS: usize> Serialize
    for Logic<MSB, LSB, SIGNED, LIMBS>
{
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let digits = self.format_with(FormatSpec::BINARY);
        serializer.serialize_str(&format!("{}'b{digits}", Self::WIDTH))
    }
}

struct LiteralVisitor<T>(PhantomData<T>);

impl<T> Visitor<'_> for LiteralVisitor<T>
where
    T: FromStr,
    T::Err: fmt::Display,
{
    type Value = T;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a SystemVerilog literal string")
    }

    fn visit_str<E: de::Error>(self, text: &str) -> Result<T, E> {
        text.parse().map_err(E::custom)
    }
}

impl<'de, const MSB: usize, const LSB: usize, const SIGNED: bool, const LIMBS: usize>
    Deserialize<'de> for Bit<MSB, LSB, SIGNED, LIMBS>
{
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_str(LiteralVisitor(PhantomData))
    }
}

impl<'de, const MSB: usize, const LSB: usize, const SIGNED: bool, const LIMBS: usize>
    Deserialize<'de> for Logic<MSB, LSB, SIGNED, LIMBS>
{
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_str(LiteralVisitor(PhantomData))
    }
}
