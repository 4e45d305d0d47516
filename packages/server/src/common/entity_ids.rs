//! Typed ID definitions for all domain entities.
//!
//! # Example
//!
//! ```rust
//! use emasjid_core::common::{MemberId, PersonId};
//!
//! let member_id = MemberId::new(1);
//! let person_id = PersonId::new(1);
//!
//! // This would be a compile error:
//! // let wrong: PersonId = member_id;
//! # let _ = (member_id, person_id);
//! ```

pub use super::id::Id;

// ============================================================================
// Entity marker types
// ============================================================================

/// Marker type for Person entities (biographical record).
pub struct Person;

/// Marker type for Member entities (khairat member).
pub struct Member;

/// Marker type for Tag entities.
pub struct Tag;

/// Marker type for MemberTag link rows.
pub struct MemberTag;

/// Marker type for Dependent entities.
pub struct Dependent;

/// Marker type for PaymentHistory entities.
pub struct PaymentHistory;

/// Marker type for TabungType lookup rows.
pub struct TabungType;

/// Marker type for Tabung entities (collection fund).
pub struct Tabung;

/// Marker type for Kutipan entities (single collection record).
pub struct Kutipan;

/// Marker type for CadanganType lookup rows.
pub struct CadanganType;

/// Marker type for Cadangan entities (suggestion/complaint).
pub struct Cadangan;

// ============================================================================
// Type aliases - the primary API
// ============================================================================

pub type PersonId = Id<Person>;
pub type MemberId = Id<Member>;
pub type TagId = Id<Tag>;
pub type MemberTagId = Id<MemberTag>;
pub type DependentId = Id<Dependent>;
pub type PaymentHistoryId = Id<PaymentHistory>;
pub type TabungTypeId = Id<TabungType>;
pub type TabungId = Id<Tabung>;
pub type KutipanId = Id<Kutipan>;
pub type CadanganTypeId = Id<CadanganType>;
pub type CadanganId = Id<Cadangan>;
