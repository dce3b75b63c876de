//! The [`Component`] trait and stable component type identity.
//!
//! Every value stored in the ECS implements [`Component`], which pins a
//! string type name at compile time. The [`ComponentTypeId`] used as a
//! storage and query key is the FNV-1a 64-bit hash of that name, so type
//! identity never requires constructing a throwaway instance and stays
//! stable across builds.

/// A unique identifier for a component type, derived from the component's
/// string name with the FNV-1a 64-bit hash.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ComponentTypeId(pub u64);

impl ComponentTypeId {
    const FNV_OFFSET_BASIS: u64 = 0xcbf2_9ce4_8422_2325;
    const FNV_PRIME: u64 = 0x0100_0000_01b3;

    /// Hash a component type name into its id.
    ///
    /// Deterministic: the same name always yields the same id, in any
    /// build. Distinct names collide only with FNV's negligible
    /// probability.
    #[must_use]
    pub const fn from_name(name: &str) -> Self {
        let bytes = name.as_bytes();
        let mut hash = Self::FNV_OFFSET_BASIS;
        let mut i = 0;
        while i < bytes.len() {
            hash ^= bytes[i] as u64;
            hash = hash.wrapping_mul(Self::FNV_PRIME);
            i += 1;
        }
        Self(hash)
    }

    /// The id for a Rust component type `T`.
    #[must_use]
    pub fn of<T: Component>() -> Self {
        Self::from_name(T::type_name())
    }
}

/// The contract for all data stored in the ECS.
///
/// Components are data-only values: no behavior, no references into the
/// world. A given entity holds at most one component per type name;
/// adding a second overwrites the first.
///
/// # Examples
///
/// ```rust
/// use spinor_ecs::Component;
///
/// #[derive(Debug, Clone, Copy)]
/// struct Health {
///     current: f64,
///     max: f64,
/// }
///
/// impl Component for Health {
///     fn type_name() -> &'static str { "Health" }
/// }
/// ```
pub trait Component: Send + Sync + 'static {
    /// The stable, human-readable name for this component type.
    fn type_name() -> &'static str;

    /// The storage/query key for this component type.
    fn component_type_id() -> ComponentTypeId {
        ComponentTypeId::from_name(Self::type_name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, Copy)]
    struct Health {
        #[allow(dead_code)]
        current: f64,
    }

    impl Component for Health {
        fn type_name() -> &'static str {
            "Health"
        }
    }

    #[derive(Debug, Clone, Copy)]
    struct Stamina;

    impl Component for Stamina {
        fn type_name() -> &'static str {
            "Stamina"
        }
    }

    #[test]
    fn test_type_id_is_stable() {
        assert_eq!(Health::component_type_id(), Health::component_type_id());
        assert_eq!(
            Health::component_type_id(),
            ComponentTypeId::from_name("Health")
        );
    }

    #[test]
    fn test_type_id_differs_between_types() {
        assert_ne!(Health::component_type_id(), Stamina::component_type_id());
    }

    #[test]
    fn test_fnv1a_known_vector() {
        // FNV-1a of the empty string is the offset basis itself.
        assert_eq!(
            ComponentTypeId::from_name(""),
            ComponentTypeId(0xcbf2_9ce4_8422_2325)
        );
    }

    #[test]
    fn test_of_matches_from_name() {
        assert_eq!(
            ComponentTypeId::of::<Health>(),
            ComponentTypeId::from_name("Health")
        );
    }
}
