//! User roles and the role-specific certificate feed.

use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumString};

use crate::api::endpoints;

/// The closed set of roles the backend issues at login.
///
/// The canonical wire names are `STUDENT`, `TEACHER` and `ADMIN`. The legacy
/// backend names (`ALUNO`, `PROFESSOR`, `ADMINISTRADOR`) are still accepted when
/// parsing, both from login payloads and from previously persisted sessions.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString, AsRefStr,
)]
pub enum Role {
    #[serde(rename = "STUDENT", alias = "ALUNO")]
    #[strum(to_string = "STUDENT", serialize = "ALUNO")]
    Student,
    #[serde(rename = "TEACHER", alias = "PROFESSOR")]
    #[strum(to_string = "TEACHER", serialize = "PROFESSOR")]
    Teacher,
    #[serde(rename = "ADMIN", alias = "ADMINISTRADOR")]
    #[strum(to_string = "ADMIN", serialize = "ADMINISTRADOR")]
    Admin,
}

impl Role {
    /// Returns the certificate collection this role synchronizes after login.
    ///
    /// Roles without one (administrators) only receive notices.
    pub const fn certificate_feed(self) -> Option<CertificateFeed> {
        match self {
            Role::Student => Some(CertificateFeed::MINE),
            Role::Teacher => Some(CertificateFeed::PENDING_REVIEW),
            Role::Admin => None,
        }
    }
}

/// Which session collection a certificate feed fills.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CertificateTarget {
    /// `Session::certificates`
    Mine,
    /// `Session::certificates_pending_review`
    PendingReview,
}

/// A role-specific certificate endpoint paired with the session field it fills.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CertificateFeed {
    pub endpoint: &'static str,
    pub target: CertificateTarget,
}

impl CertificateFeed {
    pub const MINE: Self = Self {
        endpoint: endpoints::MY_CERTIFICATES,
        target: CertificateTarget::Mine,
    };

    pub const PENDING_REVIEW: Self = Self {
        endpoint: endpoints::PENDING_REVIEW_CERTIFICATES,
        target: CertificateTarget::PendingReview,
    };
}
