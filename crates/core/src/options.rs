//! Daily training menu.
//!
//! Each character is offered one special training for its role plus two
//! general trainings. The menu is persisted with the day it was drawn for,
//! so refreshing the client never reshuffles it mid-day.

use std::collections::HashSet;

use rand::seq::IndexedRandom;
use rand::Rng;

use crate::catalog::{TrainingCatalog, TrainingDefinition};
use crate::character::{CharacterState, DailyOptions};
use crate::error::CoreError;
use crate::role::PlayerRole;
use crate::types::GameDate;

/// Entries in a full menu.
pub const MENU_SIZE: usize = 3;

/// General (non-mandatory) entries drawn per menu.
pub const GENERAL_PICKS: usize = MENU_SIZE - 1;

/// Menu length the catalog can support: a small general pool is taken whole.
pub fn expected_menu_len(catalog: &TrainingCatalog) -> usize {
    1 + catalog.general_pool().len().min(GENERAL_PICKS)
}

/// Draw a fresh menu for `role`: one special chosen uniformly from the
/// role's eligible set, then general entries without replacement.
pub fn generate_menu<R: Rng + ?Sized>(
    catalog: &TrainingCatalog,
    role: PlayerRole,
    rng: &mut R,
) -> Result<Vec<TrainingDefinition>, CoreError> {
    let specials = catalog.mandatory_for(role);
    let special = specials.choose(rng).ok_or_else(|| {
        CoreError::Configuration(format!("No mandatory training configured for role {role}"))
    })?;

    let pool = catalog.general_pool();
    let mut menu = Vec::with_capacity(MENU_SIZE);
    menu.push((*special).clone());
    menu.extend(pool.choose_multiple(rng, GENERAL_PICKS).map(|d| (*d).clone()));
    Ok(menu)
}

/// The stored menu, if it was drawn for `today` and still matches the catalog.
pub fn stored_menu(
    state: &CharacterState,
    catalog: &TrainingCatalog,
    today: GameDate,
) -> Option<Vec<TrainingDefinition>> {
    let stored = state.todays_options.as_ref()?;
    if stored.date != today || stored.training_ids.len() != expected_menu_len(catalog) {
        return None;
    }

    let distinct: HashSet<_> = stored.training_ids.iter().collect();
    if distinct.len() != stored.training_ids.len() {
        return None;
    }

    let defs = stored
        .training_ids
        .iter()
        .map(|id| catalog.get(*id).cloned())
        .collect::<Option<Vec<_>>>()?;

    let specials = defs.iter().filter(|d| d.is_special_for(state.role)).count();
    let others_general = defs.iter().all(|d| !d.mandatory || d.is_special_for(state.role));
    (specials == 1 && others_general).then_some(defs)
}

/// Draw a new menu for `today` and store it on the character.
pub fn regenerate_menu<R: Rng + ?Sized>(
    state: &mut CharacterState,
    catalog: &TrainingCatalog,
    today: GameDate,
    rng: &mut R,
) -> Result<Vec<TrainingDefinition>, CoreError> {
    let menu = generate_menu(catalog, state.role, rng)?;
    state.todays_options = Some(DailyOptions {
        date: today,
        training_ids: menu.iter().map(|d| d.id).collect(),
    });
    Ok(menu)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Menu {
    pub options: Vec<TrainingDefinition>,
    /// `true` when the menu was drawn by this call and must be persisted.
    pub regenerated: bool,
}

/// Return today's menu, drawing and storing a new one when the stored menu
/// is missing, stale, or no longer valid against the catalog.
pub fn ensure_menu<R: Rng + ?Sized>(
    state: &mut CharacterState,
    catalog: &TrainingCatalog,
    today: GameDate,
    rng: &mut R,
) -> Result<Menu, CoreError> {
    if let Some(options) = stored_menu(state, catalog, today) {
        return Ok(Menu {
            options,
            regenerated: false,
        });
    }
    let options = regenerate_menu(state, catalog, today, rng)?;
    Ok(Menu {
        options,
        regenerated: true,
    })
}
