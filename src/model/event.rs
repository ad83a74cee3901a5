use serde::{Deserialize, Serialize};

use super::terrain::TerrainType;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub enum EventType {
    WagonBreakdown,
    BanditAttack,
    WeatherStorm,
    RoadBlock,
    Sickness,
    TradeOpportunity,
    LuckyFind,
    GoodWeather,
    NewRecruits,
    CityEvent,
    TravelEncounter,
}

string_enum!(EventType {
    WagonBreakdown => "wagon_breakdown",
    BanditAttack => "bandit_attack",
    WeatherStorm => "weather_storm",
    RoadBlock => "road_block",
    Sickness => "sickness",
    TradeOpportunity => "trade_opportunity",
    LuckyFind => "lucky_find",
    GoodWeather => "good_weather",
    NewRecruits => "new_recruits",
    CityEvent => "city_event",
    TravelEncounter => "travel_encounter",
});

// ---------------------------------------------------------------------------
// Constants — Periodic draw ladder (upper bounds, exclusive)
// ---------------------------------------------------------------------------

const TRADE_OPPORTUNITY_BELOW: f32 = 0.3;
const LUCKY_FIND_BELOW: f32 = 0.5;
const GOOD_WEATHER_BELOW: f32 = 0.6;
const NEW_RECRUITS_BELOW: f32 = 0.7;
const CITY_EVENT_BELOW: f32 = 0.8;

// ---------------------------------------------------------------------------
// Constants — Immediate effects per unit severity
// ---------------------------------------------------------------------------

const TRADE_OPPORTUNITY_GOLD: f32 = 100.0;
const LUCKY_FIND_GOLD: f32 = 50.0;
const GOOD_WEATHER_MORALE: f32 = 0.1;
const NEW_RECRUITS_GUARDS: f32 = 2.0;

// ---------------------------------------------------------------------------
// Constants — Ongoing drains (per second per unit severity)
// ---------------------------------------------------------------------------

const STORM_MORALE_DRAIN: f32 = 0.02;
const SICKNESS_MORALE_DRAIN: f32 = 0.05;

/// Distance bonus to the periodic event chance, per distance unit.
const DISTANCE_CHANCE_DIVISOR: f32 = 1000.0;
const MAX_DISTANCE_CHANCE_BONUS: f32 = 0.3;

/// Immediate resource deltas produced by a periodic event.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ImmediateEffect {
    pub gold: u32,
    pub guards: u32,
    pub morale: f32,
}

impl EventType {
    /// Lifetime of the timed event entity, in seconds.
    pub fn duration_secs(self) -> f32 {
        match self {
            EventType::WeatherStorm => 30.0,
            EventType::GoodWeather => 45.0,
            EventType::Sickness => 60.0,
            EventType::RoadBlock => 15.0,
            _ => 20.0,
        }
    }

    /// Pick a periodic event category from a uniform sample in `[0, 1)`.
    pub fn periodic_from_sample(sample: f32) -> Self {
        if sample < TRADE_OPPORTUNITY_BELOW {
            EventType::TradeOpportunity
        } else if sample < LUCKY_FIND_BELOW {
            EventType::LuckyFind
        } else if sample < GOOD_WEATHER_BELOW {
            EventType::GoodWeather
        } else if sample < NEW_RECRUITS_BELOW {
            EventType::NewRecruits
        } else if sample < CITY_EVENT_BELOW {
            EventType::CityEvent
        } else {
            EventType::TravelEncounter
        }
    }

    /// Pick the terrain-specific hazard for a travel event from a uniform sample.
    pub fn travel_from_sample(terrain: TerrainType, sample: f32) -> Self {
        match terrain {
            TerrainType::Forest if sample < 0.6 => EventType::BanditAttack,
            TerrainType::Forest => EventType::WagonBreakdown,
            TerrainType::Mountains if sample < 0.7 => EventType::WeatherStorm,
            TerrainType::Mountains => EventType::WagonBreakdown,
            TerrainType::Desert => EventType::WeatherStorm,
            TerrainType::River => EventType::WagonBreakdown,
            TerrainType::Road | TerrainType::Plains if sample < 0.5 => EventType::BanditAttack,
            TerrainType::Road | TerrainType::Plains => EventType::RoadBlock,
        }
    }

    pub fn immediate_effect(self, severity: f32) -> ImmediateEffect {
        match self {
            EventType::TradeOpportunity => ImmediateEffect {
                gold: (TRADE_OPPORTUNITY_GOLD * severity) as u32,
                ..Default::default()
            },
            EventType::LuckyFind => ImmediateEffect {
                gold: (LUCKY_FIND_GOLD * severity) as u32,
                ..Default::default()
            },
            EventType::GoodWeather => ImmediateEffect {
                morale: GOOD_WEATHER_MORALE * severity,
                ..Default::default()
            },
            EventType::NewRecruits => ImmediateEffect {
                guards: (NEW_RECRUITS_GUARDS * severity) as u32,
                ..Default::default()
            },
            _ => ImmediateEffect::default(),
        }
    }

    /// Morale lost per second while the event is active.
    pub fn morale_drain_per_sec(self, severity: f32) -> f32 {
        match self {
            EventType::WeatherStorm => STORM_MORALE_DRAIN * severity,
            EventType::Sickness => SICKNESS_MORALE_DRAIN * severity,
            _ => 0.0,
        }
    }

    pub fn describe(self, severity: f32) -> String {
        let label = match self {
            EventType::WagonBreakdown => "A wagon broke down",
            EventType::BanditAttack => "Bandits attacked the caravan",
            EventType::WeatherStorm => "A storm slows the caravan",
            EventType::RoadBlock => "The road ahead is blocked",
            EventType::Sickness => "Sickness spreads among the crew",
            EventType::TradeOpportunity => "A lucrative trade opportunity",
            EventType::LuckyFind => "Found abandoned goods by the road",
            EventType::GoodWeather => "Fair weather lifts spirits",
            EventType::NewRecruits => "Volunteers join the guard",
            EventType::CityEvent => "News from a nearby city",
            EventType::TravelEncounter => "A fellow traveller shares the road",
        };
        format!("{label} (severity {severity:.2})")
    }
}

/// Chance that a periodic event fires, given the base chance and distance travelled.
pub fn periodic_event_chance(base_chance: f32, total_distance: f32) -> f32 {
    base_chance + (total_distance / DISTANCE_CHANCE_DIVISOR).min(MAX_DISTANCE_CHANCE_BONUS)
}
