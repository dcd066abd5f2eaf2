//! Fixed prompt templates for the narrative service.

use hg_core::Species;
use hg_state::{LifeStage, Pet, ReactionEvent, STAT_MAX};

fn event_line(event: ReactionEvent) -> &'static str {
    match event {
        ReactionEvent::Feed => "Player fed you.",
        ReactionEvent::Pet => "Player pet you.",
        ReactionEvent::Clean => "Player cleaned the area.",
        ReactionEvent::Evolve => "LEVEL UP! Evolution triggered.",
    }
}

fn voice(stage: LifeStage) -> &'static str {
    match stage {
        LifeStage::Infant => "Sound like a tiny baby mob.",
        LifeStage::Adult => "Sound like a plucky adventurer.",
        LifeStage::Breeding => "Sound like a proud guardian of the herd.",
        LifeStage::Matriarch => "Sound like a legendary boss.",
    }
}

/// Prompt for a short in-character reaction line.
pub(crate) fn reaction(pet: &Pet, event: ReactionEvent) -> String {
    let species = pet.species.data();
    format!(
        "You are a {species} named {name} in a pixel-art revival game called HerGenesis.\n\
         Stage: {stage}. Hunger: {hunger}/{max}. Love: {intimacy}/{max}. Health: {health}/{max}.\n\
         The player just did this: {event}\n\
         Reply with one short 8-bit RPG style line, at most 15 words, caps for emphasis. {voice}",
        species = species.name,
        name = pet.name,
        stage = pet.stage,
        hunger = pet.stats.hunger,
        intimacy = pet.stats.intimacy,
        health = pet.stats.health,
        max = STAT_MAX,
        event = event_line(event),
        voice = voice(pet.stage),
    )
}

/// Prompt for a one-sentence lore snippet.
pub(crate) fn lore(species: Species) -> String {
    let data = species.data();
    format!(
        "Write one retro RPG sentence describing the creature {} ({}), extinct since {}. Pixel art vibe.",
        data.name, data.scientific_name, data.extinction_year
    )
}
