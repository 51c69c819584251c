//! Domain identifiers.
//!
//! # ULID ベースの RunId
//! `start` 1 回ごとに RunId を払い出し、ログと ReportLine の相関に使う。
//!
//! ## ULID の特性
//! - **時刻でソート可能**: 先に start した run ほど小さい
//! - **128-bit**: UUID と同じサイズ

use serde::{Deserialize, Serialize};
use std::fmt;
use ulid::Ulid;

/// Identifier of one reporter run (one `start` call).
#[repr(transparent)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RunId(Ulid);

impl RunId {
    const PREFIX: &'static str = "run-";

    /// ULID から RunId を作成
    pub fn from_ulid(ulid: Ulid) -> Self {
        Self(ulid)
    }

    /// 内部の ULID を取得
    pub fn as_ulid(&self) -> Ulid {
        self.0
    }
}

impl From<Ulid> for RunId {
    fn from(ulid: Ulid) -> Self {
        Self::from_ulid(ulid)
    }
}

impl fmt::Display for RunId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", Self::PREFIX, self.0)
    }
}
