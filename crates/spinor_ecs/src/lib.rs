//! # spinor_ecs
//!
//! The entity-component store. Entities are opaque `u64` ids, components
//! are plain typed values keyed by a stable [`ComponentTypeId`], and the
//! [`World`] answers set-intersection queries over component types with a
//! conservatively invalidated result cache.
//!
//! Components follow a copy-on-write discipline: values read out of the
//! world are owned or borrowed snapshots, and "mutation" means inserting a
//! new value via [`World::add_component`]. Systems can therefore hold on
//! to component values across a frame without aliasing hazards.
//!
//! This crate provides:
//!
//! - [`Component`] trait and [`ComponentTypeId`]: compile-time type identity.
//! - [`Entity`] / [`EntityAllocator`]: monotonically increasing ids.
//! - [`World`]: storage, queries, and change notifications.
//! - [`EntityBuilder`] / [`QueryBuilder`]: fluent construction helpers.

pub mod builder;
pub mod component;
pub mod entity;
pub mod events;
pub mod world;

pub use builder::EntityBuilder;
pub use component::{Component, ComponentTypeId};
pub use entity::{Entity, EntityAllocator};
pub use events::{EventKind, SubscriptionId, WorldEvent};
pub use world::{QueryBuilder, World};
