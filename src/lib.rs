//! **bezier-ease**: CSS-style cubic Bézier easing curves.
//!
//! A curve is defined by two control points with its endpoints fixed at
//! (0,0) and (1,1), exactly like CSS `cubic-bezier()`.  It maps progress
//! `x ∈ [0, 1]` to an eased value `y`.
//!
//! # Architecture
//!
//! * [`bezier`]: the [`CubicBezier`](bezier::CubicBezier) solver.  A table
//!   of x(t) samples built at construction brackets `t` for a query `x`;
//!   Newton-Raphson refines it, with binary subdivision as the fallback
//!   where the curve is too flat.
//! * [`timing`]: CSS preset keywords, `cubic-bezier(...)` parsing and
//!   serde support for curves.
//! * [`config`]: the JSON configuration used by the `bezier-ease` binary.

pub mod bezier;
pub mod config;
pub mod timing;
