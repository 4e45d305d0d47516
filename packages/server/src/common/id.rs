//! Typed surrogate-key wrappers for compile-time type safety.
//!
//! This module provides `Id<T>`, a typed wrapper around the `BIGSERIAL` primary
//! keys the database assigns. It prevents accidentally mixing up different ID
//! types (e.g., passing a `PersonId` where a `MemberId` was expected).
//!
//! # Example
//!
//! ```rust
//! use emasjid_core::common::id::Id;
//!
//! pub struct Member;
//! pub struct Person;
//!
//! pub type MemberId = Id<Member>;
//! pub type PersonId = Id<Person>;
//!
//! let member_id = MemberId::new(7);
//! let person_id = PersonId::new(7);
//!
//! // This would be a compile error:
//! // let wrong: PersonId = member_id;
//! # let _ = (member_id, person_id);
//! ```
//!
//! On the wire an `Id<T>` is a plain JSON number and in Postgres it is `INT8`,
//! so it is a drop-in replacement for `i64` columns.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::cmp::Ordering;
use std::fmt::{self, Debug, Display};
use std::hash::{Hash, Hasher};
use std::marker::PhantomData;
use std::num::ParseIntError;
use std::str::FromStr;

/// A typed wrapper around an `i64` surrogate key.
///
/// IDs with different `T` parameters are incompatible at compile time:
///
/// ```compile_fail
/// use emasjid_core::common::id::Id;
///
/// struct Tag;
/// struct Member;
///
/// let tag_id: Id<Tag> = Id::new(1);
/// let member_id: Id<Member> = tag_id; // Compile error!
/// ```
#[repr(transparent)]
pub struct Id<T>(i64, PhantomData<fn() -> T>);

// ============================================================================
// Core implementations
// ============================================================================

impl<T> Id<T> {
    /// Wraps a raw key, typically one read back from the database.
    #[inline]
    pub const fn new(value: i64) -> Self {
        Self(value, PhantomData)
    }

    /// Returns the raw key.
    #[inline]
    pub const fn get(self) -> i64 {
        self.0
    }
}

// ============================================================================
// Standard trait implementations
// ============================================================================

impl<T> Clone for Id<T> {
    #[inline]
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Id<T> {}

impl<T> Debug for Id<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple(&format!("Id<{}>", std::any::type_name::<T>()))
            .field(&self.0)
            .finish()
    }
}

impl<T> Display for Id<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        Display::fmt(&self.0, f)
    }
}

impl<T> PartialEq for Id<T> {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        self.0 == other.0
    }
}

impl<T> Eq for Id<T> {}

impl<T> PartialOrd for Id<T> {
    #[inline]
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<T> Ord for Id<T> {
    #[inline]
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.cmp(&other.0)
    }
}

impl<T> Hash for Id<T> {
    #[inline]
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.0.hash(state);
    }
}

impl<T> From<i64> for Id<T> {
    #[inline]
    fn from(value: i64) -> Self {
        Self::new(value)
    }
}

impl<T> From<Id<T>> for i64 {
    #[inline]
    fn from(id: Id<T>) -> Self {
        id.0
    }
}

impl<T> FromStr for Id<T> {
    type Err = ParseIntError;

    #[inline]
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim().parse::<i64>().map(Self::new)
    }
}

// ============================================================================
// Serde support
// ============================================================================

impl<T> Serialize for Id<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.0.serialize(serializer)
    }
}

impl<'de, T> Deserialize<'de> for Id<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        i64::deserialize(deserializer).map(Self::new)
    }
}

/// A `{"id": n}` reference to another entity inside a request body.
///
/// The dashboard posts nested objects (`"tag": {"id": 3, "name": "..."}`) where
/// only the key matters; any other fields are ignored.
#[derive(Serialize, Deserialize)]
#[serde(bound = "")]
pub struct IdRef<T> {
    pub id: Id<T>,
}

impl<T> Clone for IdRef<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for IdRef<T> {}

impl<T> Debug for IdRef<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IdRef").field("id", &self.id).finish()
    }
}

impl<T> From<Id<T>> for IdRef<T> {
    fn from(id: Id<T>) -> Self {
        Self { id }
    }
}

// ============================================================================
// sqlx support
// ============================================================================

use sqlx::encode::IsNull;
use sqlx::error::BoxDynError;
use sqlx::postgres::{PgArgumentBuffer, PgHasArrayType, PgTypeInfo, PgValueRef, Postgres};
use sqlx::{Decode, Encode, Type};

impl<T> Type<Postgres> for Id<T> {
    fn type_info() -> PgTypeInfo {
        <i64 as Type<Postgres>>::type_info()
    }

    fn compatible(ty: &PgTypeInfo) -> bool {
        <i64 as Type<Postgres>>::compatible(ty)
    }
}

impl<T> PgHasArrayType for Id<T> {
    fn array_type_info() -> PgTypeInfo {
        <i64 as PgHasArrayType>::array_type_info()
    }
}

impl<T> Encode<'_, Postgres> for Id<T> {
    fn encode_by_ref(&self, buf: &mut PgArgumentBuffer) -> Result<IsNull, BoxDynError> {
        <i64 as Encode<Postgres>>::encode_by_ref(&self.0, buf)
    }
}

impl<T> Decode<'_, Postgres> for Id<T> {
    fn decode(value: PgValueRef<'_>) -> Result<Self, BoxDynError> {
        <i64 as Decode<Postgres>>::decode(value).map(Self::new)
    }
}

// ============================================================================
// Tests
// ============================================================================
