//! Generation orchestrator.
//!
//! Drives the registrar, clip synthesizer, layer composer and paginator once
//! per toggle slot, in slot order. The run is sequential because every step
//! reads state left behind by earlier slots: parameter existence checks and
//! first-fit page placement both depend on it.
//!
//! There is no rollback. An entry that fails halfway keeps whatever it
//! already registered, and the run carries on with the next slot.

use std::collections::HashMap;
use std::path::Path;

use serde::Serialize;
use tracing::{debug, info, warn};

use crate::constants::{DEFAULT_MENU_PREFIX, MENU_PAGE_CAPACITY};
use crate::models::{
    AnimatorController, ClipRef, ExposedParameters, GenerationRequest, MenuControl, MenuPage,
    SceneGraph, ToggleEntry, ToggleState,
};
use crate::services::clips::synthesize_clip;
use crate::services::error::GenerationError;
use crate::services::layers::compose_layer;
use crate::services::menus::MenuPaginator;
use crate::services::parameters::{register_toggle_parameter, toggle_parameter_name};
use crate::store::AssetStore;

/// Tunables that stay fixed for a whole run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationOptions {
    /// Prefix of menu page names
    pub menu_prefix: String,
    /// Controls per menu page
    pub page_capacity: usize,
}

impl Default for GenerationOptions {
    fn default() -> Self {
        Self {
            menu_prefix: DEFAULT_MENU_PREFIX.to_string(),
            page_capacity: MENU_PAGE_CAPACITY,
        }
    }
}

/// What happened to one toggle slot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum EntryOutcome {
    /// Layer, parameters and menu control were all produced
    Generated {
        /// Slot index
        index: usize,
        /// Target name
        target: String,
        /// Parameter name
        parameter: String,
        /// Index of the new controller layer
        layer: usize,
        /// Index of the menu page holding the control
        page: usize,
    },
    /// Absent slot, nothing was produced
    Skipped {
        /// Slot index
        index: usize,
    },
    /// The entry stopped partway
    Failed {
        /// Slot index
        index: usize,
        /// Target name
        target: String,
        /// Why it stopped
        error: GenerationError,
    },
}

/// Summary of a generation run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct GenerationReport {
    /// Menu pages in creation order, as persisted
    pub pages: Vec<MenuPage>,
    /// One outcome per slot, in slot order
    pub outcomes: Vec<EntryOutcome>,
    /// Parameters appended to the controller
    pub controller_parameters_added: usize,
    /// Parameters appended to the exposed list
    pub exposed_parameters_added: usize,
    /// Registrations that found the name already taken, across both registries
    pub parameters_existing: usize,
    /// Layers appended to the controller
    pub layers_added: usize,
    /// Clips persisted, in order
    pub clips: Vec<ClipRef>,
    /// Clips that replaced one persisted earlier in the same run
    pub overwritten_clips: Vec<String>,
}

impl GenerationReport {
    /// Number of fully generated entries.
    #[must_use]
    pub fn generated_count(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|o| matches!(o, EntryOutcome::Generated { .. }))
            .count()
    }

    /// Number of absent slots.
    #[must_use]
    pub fn skipped_count(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|o| matches!(o, EntryOutcome::Skipped { .. }))
            .count()
    }

    /// Failed entries with their errors.
    pub fn failures(&self) -> impl Iterator<Item = (usize, &GenerationError)> {
        self.outcomes.iter().filter_map(|o| match o {
            EntryOutcome::Failed { index, error, .. } => Some((*index, error)),
            _ => None,
        })
    }

    /// Total controls across all pages.
    #[must_use]
    pub fn control_count(&self) -> usize {
        self.pages.iter().map(|p| p.controls.len()).sum()
    }

    fn record_clip(&mut self, clip: ClipRef) {
        if self.clips.iter().any(|c| c.location == clip.location) {
            warn!("Clip {} replaced one written earlier in this run", clip.name);
            self.overwritten_clips.push(clip.name.clone());
        }
        self.clips.push(clip);
    }
}

/// Result of checking one slot without generating anything.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EntryCheck {
    /// Slot index
    pub index: usize,
    /// Target name, `None` for absent slots
    pub target: Option<String>,
    /// Parameter the entry would use
    pub parameter: Option<String>,
    /// Clip binding path the entry would use
    pub owner_path: Option<String>,
    /// Error the entry would hit
    pub error: Option<GenerationError>,
    /// Earlier slot whose target has the same name, so both would write the
    /// same clip files
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duplicate_of: Option<usize>,
}

/// Folders a run writes to.
struct Destinations<'r> {
    clips: &'r Path,
    menus: &'r Path,
}

/// Runs toggle generation against one scene.
pub struct ToggleGenerator<'a> {
    scene: &'a SceneGraph,
    paginator: MenuPaginator,
}

impl<'a> ToggleGenerator<'a> {
    /// Creates a generator.
    pub fn new(scene: &'a SceneGraph, options: &GenerationOptions) -> Self {
        Self {
            scene,
            paginator: MenuPaginator::new(options.menu_prefix.clone(), options.page_capacity),
        }
    }

    fn destinations(request: &GenerationRequest) -> Result<Destinations<'_>, GenerationError> {
        let clips = request
            .clip_folder
            .as_deref()
            .ok_or_else(|| GenerationError::MissingDestination {
                destination: "clip".to_string(),
            })?;
        let menus = request
            .menu_folder
            .as_deref()
            .ok_or_else(|| GenerationError::MissingDestination {
                destination: "menu".to_string(),
            })?;
        Ok(Destinations { clips, menus })
    }

    /// Target name of each slot, `None` for absent slots and dangling ids.
    fn slot_names<'r>(
        &'r self,
        request: &'r GenerationRequest,
    ) -> impl Iterator<Item = Option<(ToggleEntry, &'a str)>> + 'r {
        request
            .entries
            .iter()
            .map(move |slot| slot.and_then(|e| self.scene.name(e.target).map(|n| (e, n))))
    }

    /// For each slot, the first earlier slot whose target has the same name.
    fn duplicate_names(&self, request: &GenerationRequest) -> Vec<Option<usize>> {
        let mut first_seen: HashMap<&str, usize> = HashMap::new();
        self.slot_names(request)
            .enumerate()
            .map(|(index, slot)| {
                let (_, name) = slot?;
                let first = *first_seen.entry(name).or_insert(index);
                (first != index).then_some(first)
            })
            .collect()
    }

    /// Checks a request without touching any registry or store.
    ///
    /// # Errors
    ///
    /// Structural errors only; per-slot problems are reported in the checks.
    pub fn preflight(&self, request: &GenerationRequest) -> Result<Vec<EntryCheck>, GenerationError> {
        Self::destinations(request)?;

        let duplicates = self.duplicate_names(request);
        let checks = self
            .slot_names(request)
            .zip(duplicates)
            .enumerate()
            .map(|(index, (slot, duplicate_of))| {
                let Some((entry, name)) = slot else {
                    return EntryCheck {
                        index,
                        target: None,
                        parameter: None,
                        owner_path: None,
                        error: Some(GenerationError::InvalidTarget { index }),
                        duplicate_of: None,
                    };
                };
                let clip = synthesize_clip(self.scene, request.root, entry.target, ToggleState::On);

                EntryCheck {
                    index,
                    target: Some(name.to_string()),
                    parameter: Some(toggle_parameter_name(name)),
                    owner_path: clip.as_ref().ok().map(|c| c.owner_path.clone()),
                    error: clip.err(),
                    duplicate_of,
                }
            })
            .collect();

        Ok(checks)
    }

    /// Generates every slot of `request`.
    ///
    /// Pages are allocated for the full slot count before any slot is
    /// processed. Absent slots are skipped. Entries that fail are recorded
    /// in the report and do not stop the run.
    ///
    /// # Errors
    ///
    /// - [`GenerationError::MissingDestination`] before anything is mutated
    /// - [`GenerationError::Store`] when a menu page cannot be persisted; all
    ///   registry and layer changes made so far are kept
    pub fn generate(
        &self,
        request: &GenerationRequest,
        controller: &mut AnimatorController,
        exposed: &mut ExposedParameters,
        store: &mut dyn AssetStore,
    ) -> Result<GenerationReport, GenerationError> {
        let destinations = Self::destinations(request)?;

        let mut report = GenerationReport {
            pages: self.paginator.preallocate(request.slot_count()),
            ..GenerationReport::default()
        };

        for (index, slot) in self.slot_names(request).enumerate() {
            let Some((entry, name)) = slot else {
                debug!("Slot {} has no target, skipping", index);
                report.outcomes.push(EntryOutcome::Skipped { index });
                continue;
            };

            let outcome = match self.generate_entry(
                request,
                &destinations,
                entry,
                name,
                controller,
                exposed,
                store,
                &mut report,
            ) {
                Ok((parameter, layer, page)) => EntryOutcome::Generated {
                    index,
                    target: name.to_string(),
                    parameter,
                    layer,
                    page,
                },
                Err(error) => {
                    warn!("Toggle {} ({}) failed: {}", index, name, error);
                    EntryOutcome::Failed {
                        index,
                        target: name.to_string(),
                        error,
                    }
                }
            };
            report.outcomes.push(outcome);
        }

        for page in &report.pages {
            store
                .persist_menu_page(page, destinations.menus)
                .map_err(|e| GenerationError::store(&e))?;
        }
        store.refresh();

        info!(
            "Generation complete. {} generated, {} skipped, {} pages",
            report.generated_count(),
            report.skipped_count(),
            report.pages.len()
        );
        Ok(report)
    }

    #[allow(clippy::too_many_arguments)]
    fn generate_entry(
        &self,
        request: &GenerationRequest,
        destinations: &Destinations<'_>,
        entry: ToggleEntry,
        name: &str,
        controller: &mut AnimatorController,
        exposed: &mut ExposedParameters,
        store: &mut dyn AssetStore,
        report: &mut GenerationReport,
    ) -> Result<(String, usize, usize), GenerationError> {
        let parameter = toggle_parameter_name(name);

        if register_toggle_parameter(controller, &parameter, entry.default_on).is_added() {
            report.controller_parameters_added += 1;
        } else {
            report.parameters_existing += 1;
        }
        if register_toggle_parameter(exposed, &parameter, entry.default_on).is_added() {
            report.exposed_parameters_added += 1;
        } else {
            report.parameters_existing += 1;
        }

        let on_clip = synthesize_clip(self.scene, request.root, entry.target, ToggleState::On)?;
        let off_clip = synthesize_clip(self.scene, request.root, entry.target, ToggleState::Off)?;

        let on_ref = store
            .persist_clip(&on_clip, destinations.clips)
            .map_err(|e| GenerationError::store(&e))?;
        report.record_clip(on_ref.clone());
        let off_ref = store
            .persist_clip(&off_clip, destinations.clips)
            .map_err(|e| GenerationError::store(&e))?;
        report.record_clip(off_ref.clone());

        let layer = compose_layer(controller, name, on_ref, off_ref, entry.default_on);
        report.layers_added += 1;

        let page = self
            .paginator
            .place(&mut report.pages, MenuControl::toggle(name, parameter.clone()))?;
        report.pages[page].parameters = Some(exposed.name.clone());

        Ok((parameter, layer, page))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ObjectId, SceneNode};
    use crate::store::MemoryAssetStore;

    fn scene(names: &[&str]) -> SceneGraph {
        let root = names
            .iter()
            .fold(SceneNode::leaf("Avatar"), |node, name| {
                node.with_child(SceneNode::leaf(*name))
            });
        SceneGraph::from_tree(&root)
    }

    fn request(scene: &SceneGraph, names: &[&str]) -> GenerationRequest {
        let mut request = GenerationRequest::new()
            .with_root(scene.find_by_path("Avatar").unwrap())
            .with_clip_folder("clips")
            .with_menu_folder("menus");
        for name in names {
            request.add_target(scene.find_by_path(&format!("Avatar/{name}")).unwrap());
        }
        request
    }

    #[test]
    fn test_missing_destination_aborts_before_mutation() {
        let scene = scene(&["Hat"]);
        let mut req = request(&scene, &["Hat"]);
        req.menu_folder = None;

        let mut controller = AnimatorController::new("FX");
        let mut exposed = ExposedParameters::new("Params");
        let mut store = MemoryAssetStore::new();

        let err = ToggleGenerator::new(&scene, &GenerationOptions::default())
            .generate(&req, &mut controller, &mut exposed, &mut store)
            .unwrap_err();

        assert!(err.is_structural());
        assert!(controller.parameters.is_empty());
        assert!(exposed.is_empty());
        assert!(store.clips.is_empty());
        assert_eq!(store.refresh_count, 0);
    }

    #[test]
    fn test_generate_single_entry() {
        let scene = scene(&["Hat"]);
        let mut req = request(&scene, &["Hat"]);
        req.set_default_on(0, true);

        let mut controller = AnimatorController::new("FX");
        let mut exposed = ExposedParameters::new("Params");
        let mut store = MemoryAssetStore::new();

        let report = ToggleGenerator::new(&scene, &GenerationOptions::default())
            .generate(&req, &mut controller, &mut exposed, &mut store)
            .unwrap();

        assert_eq!(
            report.outcomes,
            vec![EntryOutcome::Generated {
                index: 0,
                target: "Hat".to_string(),
                parameter: "Hat_Toggle".to_string(),
                layer: 0,
                page: 0,
            }]
        );
        assert_eq!(controller.parameter("Hat_Toggle").unwrap().default_value, 1.0);
        assert_eq!(exposed.get("Hat_Toggle").unwrap().default_value, 1.0);
        assert_eq!(store.clip("Hat_On").unwrap().value, 1.0);
        assert_eq!(store.clip("Hat_Off").unwrap().value, 0.0);
        assert_eq!(report.pages[0].parameters.as_deref(), Some("Params"));
        assert_eq!(store.page("ToggleMenu_0"), Some(&report.pages[0]));
        assert_eq!(store.refresh_count, 1);
    }

    #[test]
    fn test_missing_root_fails_entry_but_keeps_parameters() {
        let scene = scene(&["Hat", "Cape"]);
        let mut req = request(&scene, &["Hat", "Cape"]);
        req.root = None;

        let mut controller = AnimatorController::new("FX");
        let mut exposed = ExposedParameters::new("Params");
        let mut store = MemoryAssetStore::new();

        let report = ToggleGenerator::new(&scene, &GenerationOptions::default())
            .generate(&req, &mut controller, &mut exposed, &mut store)
            .unwrap();

        assert_eq!(report.failures().count(), 2);
        assert!(report
            .failures()
            .all(|(_, e)| matches!(e, GenerationError::MissingRoot { .. })));
        // registration ran before clip synthesis and is not rolled back
        assert_eq!(controller.parameters.len(), 2);
        assert_eq!(exposed.len(), 2);
        assert!(controller.layers.is_empty());
        assert_eq!(report.control_count(), 0);
        assert_eq!(report.pages.len(), 1);
    }

    #[test]
    fn test_store_failure_is_per_entry_for_clips() {
        let scene = scene(&["Hat"]);
        let req = request(&scene, &["Hat"]);

        let mut controller = AnimatorController::new("FX");
        let mut exposed = ExposedParameters::new("Params");
        let mut store = MemoryAssetStore {
            read_only: true,
            ..MemoryAssetStore::default()
        };

        // clip failures are recorded per entry; the page write then aborts
        let err = ToggleGenerator::new(&scene, &GenerationOptions::default())
            .generate(&req, &mut controller, &mut exposed, &mut store)
            .unwrap_err();
        assert!(matches!(err, GenerationError::Store { .. }));
        assert!(controller.layers.is_empty());
    }

    #[test]
    fn test_dangling_target_is_skipped() {
        let scene = scene(&["Hat"]);
        let mut req = request(&scene, &["Hat"]);
        req.push_entry(Some(ToggleEntry::new(ObjectId(42), true)));

        let mut controller = AnimatorController::new("FX");
        let mut exposed = ExposedParameters::new("Params");
        let mut store = MemoryAssetStore::new();

        let report = ToggleGenerator::new(&scene, &GenerationOptions::default())
            .generate(&req, &mut controller, &mut exposed, &mut store)
            .unwrap();

        assert_eq!(report.outcomes[1], EntryOutcome::Skipped { index: 1 });
        assert_eq!(report.generated_count(), 1);
    }

    #[test]
    fn test_preflight_reports_per_slot() {
        let scene = scene(&["Hat"]);
        let mut req = request(&scene, &["Hat"]);
        req.push_entry(None);

        let checks = ToggleGenerator::new(&scene, &GenerationOptions::default())
            .preflight(&req)
            .unwrap();

        assert_eq!(checks.len(), 2);
        assert_eq!(checks[0].owner_path.as_deref(), Some("Hat"));
        assert_eq!(checks[0].parameter.as_deref(), Some("Hat_Toggle"));
        assert_eq!(checks[0].error, None);
        assert_eq!(
            checks[1].error,
            Some(GenerationError::InvalidTarget { index: 1 })
        );
    }

    #[test]
    fn test_preflight_requires_destinations() {
        let scene = scene(&[]);
        let req = GenerationRequest::new().with_clip_folder("clips");

        let err = ToggleGenerator::new(&scene, &GenerationOptions::default())
            .preflight(&req)
            .unwrap_err();
        assert_eq!(
            err,
            GenerationError::MissingDestination {
                destination: "menu".to_string()
            }
        );
    }

    fn twin_hats() -> (SceneGraph, GenerationRequest) {
        let scene = SceneGraph::from_tree(
            &SceneNode::leaf("Avatar")
                .with_child(SceneNode::leaf("Casual").with_child(SceneNode::leaf("Hat")))
                .with_child(SceneNode::leaf("Formal").with_child(SceneNode::leaf("Hat")))
                .with_child(SceneNode::leaf("Cape")),
        );
        let mut req = GenerationRequest::new()
            .with_root(scene.find_by_path("Avatar").unwrap())
            .with_clip_folder("clips")
            .with_menu_folder("menus");
        for path in ["Avatar/Casual/Hat", "Avatar/Cape", "Avatar/Formal/Hat"] {
            req.add_target(scene.find_by_path(path).unwrap());
        }
        (scene, req)
    }

    #[test]
    fn test_preflight_flags_same_named_targets() {
        let (scene, req) = twin_hats();

        let checks = ToggleGenerator::new(&scene, &GenerationOptions::default())
            .preflight(&req)
            .unwrap();

        assert_eq!(checks[0].duplicate_of, None);
        assert_eq!(checks[1].duplicate_of, None);
        assert_eq!(checks[2].duplicate_of, Some(0));
        assert_eq!(checks[2].owner_path.as_deref(), Some("Formal/Hat"));

        let json = serde_json::to_value(&checks).unwrap();
        assert!(json[0].get("duplicate_of").is_none());
        assert_eq!(json[2]["duplicate_of"], 0);
    }

    #[test]
    fn test_same_named_targets_report_overwritten_clips() {
        let (scene, req) = twin_hats();
        let mut controller = AnimatorController::new("FX");
        let mut exposed = ExposedParameters::new("Params");
        let mut store = MemoryAssetStore::new();

        let report = ToggleGenerator::new(&scene, &GenerationOptions::default())
            .generate(&req, &mut controller, &mut exposed, &mut store)
            .unwrap();

        assert_eq!(report.generated_count(), 3);
        assert_eq!(report.clips.len(), 6);
        assert_eq!(report.overwritten_clips, vec!["Hat_On", "Hat_Off"]);
        // the later target wins the shared clip files
        assert_eq!(store.clip("Hat_On").unwrap().owner_path, "Formal/Hat");
        assert_eq!(store.clips.len(), 4);
    }

    #[test]
    fn test_distinct_targets_overwrite_nothing() {
        let scene = scene(&["Hat", "Cape"]);
        let req = request(&scene, &["Hat", "Cape"]);
        let mut controller = AnimatorController::new("FX");
        let mut exposed = ExposedParameters::new("Params");
        let mut store = MemoryAssetStore::new();

        let report = ToggleGenerator::new(&scene, &GenerationOptions::default())
            .generate(&req, &mut controller, &mut exposed, &mut store)
            .unwrap();

        assert_eq!(report.clips.len(), 4);
        assert!(report.overwritten_clips.is_empty());
    }
}
