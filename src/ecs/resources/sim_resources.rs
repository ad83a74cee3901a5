use std::collections::BTreeMap;
use std::hash::{DefaultHasher, Hash, Hasher};

use bevy_ecs::entity::Entity;
use bevy_ecs::resource::Resource;
use bevy_ecs::world::World;
use rand::SeedableRng;
use rand::rngs::SmallRng;

/// Deterministic root RNG. Drawn from directly only while building the world;
/// per-tick systems use the domain RNGs below.
#[derive(Resource)]
pub struct SimRng {
    pub rng: SmallRng,
    pub seed: u64,
}

// ---------------------------------------------------------------------------
// Per-domain RNG resources
// ---------------------------------------------------------------------------

macro_rules! domain_rng {
    ($name:ident, $doc:expr) => {
        #[doc = $doc]
        #[derive(Resource)]
        pub struct $name(pub SmallRng);

        impl Default for $name {
            fn default() -> Self {
                Self(SmallRng::seed_from_u64(0))
            }
        }
    };
}

domain_rng!(MovementRng, "RNG for starvation desertion rolls.");
domain_rng!(EconomyRng, "RNG for the supply/demand random walk.");
domain_rng!(InventoryRng, "RNG for cargo decay rolls.");
domain_rng!(EventsRng, "RNG for periodic and travel events.");
domain_rng!(CombatRng, "RNG for combat power jitter.");

/// Derive a deterministic per-domain seed from the global seed, domain name, and tick count.
fn derive_domain_seed(seed: u64, domain: &str, tick: u64) -> u64 {
    let mut hasher = DefaultHasher::new();
    seed.hash(&mut hasher);
    domain.hash(&mut hasher);
    tick.hash(&mut hasher);
    hasher.finish()
}

/// Exclusive system that re-seeds all per-domain RNGs each tick.
/// Runs in `SimPhase::PreUpdate` before any domain systems.
pub fn distribute_rng(world: &mut World) {
    let seed = world.resource::<SimRng>().seed;
    let tick = world.resource::<crate::ecs::clock::SimClock>().tick_count;

    macro_rules! reseed {
        ($res:ty, $label:expr) => {
            world.resource_mut::<$res>().0 =
                SmallRng::seed_from_u64(derive_domain_seed(seed, $label, tick));
        };
    }

    reseed!(MovementRng, "movement");
    reseed!(EconomyRng, "economy");
    reseed!(InventoryRng, "inventory");
    reseed!(EventsRng, "events");
    reseed!(CombatRng, "combat");
}

/// Typed handle to the player entity. Present only once the world is built,
/// and the entity it names always carries the full convoy bundle.
#[derive(Resource, Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlayerHandle(pub Entity);

/// Name index over the `GoodData` catalog entities.
#[derive(Resource, Debug, Clone, Default)]
pub struct GoodsCatalog {
    by_name: BTreeMap<String, Entity>,
}

impl GoodsCatalog {
    pub fn insert(&mut self, name: impl Into<String>, entity: Entity) {
        self.by_name.insert(name.into(), entity);
    }

    pub fn get(&self, name: &str) -> Option<Entity> {
        self.by_name.get(name).copied()
    }

    pub fn len(&self) -> usize {
        self.by_name.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_name.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, Entity)> {
        self.by_name.iter().map(|(name, &e)| (name.as_str(), e))
    }
}
