//! Real-time backdrop effects for a single-page site.
//!
//! This crate is compiled to WebAssembly and runs in the browser. It owns
//! three independent per-frame engines: a particle field, a set of morphing
//! shapes, and a smoothed pointer indicator. The host page only supplies a
//! canvas per engine and tears the engines down when it unmounts; pointer,
//! hover and resize events are wired by [`web`].
//!
//! Everything except [`render`] and [`web`] is browser-free so the engines
//! can be stepped and inspected natively.
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`engine`] | `Effect` trait and the [`engine::EffectHost`] lifecycle |
//! | [`particles`] | Particle field simulation and connection pass |
//! | [`shapes`] | Drifting, morphing primitives |
//! | [`pointer`] | Halo/dot pointer indicator and hover labels |
//! | [`spatial`] | Uniform-grid neighbour search |
//! | [`surface`] | Drawing surface trait and a recording spy |
//! | [`listeners`] | Scoped listener registration table |
//! | [`render`] | `Surface` over `CanvasRenderingContext2d` |
//! | [`web`] | Browser mounting: frame loop and DOM listeners |
//! | [`config`] | Serde-backed engine configuration |
//! | [`fade`] | Mount fade-in ramp |
//! | [`geom`] / [`color`] | Value types |
//! | [`consts`] | Shared numeric defaults |
//! | [`error`] | Crate error type |

pub mod color;
pub mod config;
pub mod consts;
pub mod engine;
pub mod error;
pub mod fade;
pub mod geom;
pub mod listeners;
pub mod particles;
pub mod pointer;
pub mod render;
pub mod shapes;
pub mod spatial;
pub mod surface;
pub mod web;
