use crate::generator::{ComponentRenderer, GeneratedComponent, TemplateGenerator};
use crate::registry::Identifiers;
use figforge_common::{FailurePolicy, ForgeError, Result};
use figforge_core::{DesignComponent, DesignSystem};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{broadcast, watch};
use tracing::{error, info, warn};

const EVENT_CAPACITY: usize = 256;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GenerationStatus {
    Idle,
    Generating,
    Completed,
    Error,
}

/// One progress event. `current` is the 1-based index of the last item handled.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationProgress {
    pub current: usize,
    pub total: usize,
    pub current_component: String,
    pub status: GenerationStatus,
    pub message: String,
}

impl GenerationProgress {
    pub fn idle() -> Self {
        Self {
            current: 0,
            total: 0,
            current_component: String::new(),
            status: GenerationStatus::Idle,
            message: String::new(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct GenerationOptions {
    /// Pause before each item
    pub item_delay: Duration,
    pub policy: FailurePolicy,
}

impl Default for GenerationOptions {
    fn default() -> Self {
        Self {
            item_delay: Duration::ZERO,
            policy: FailurePolicy::Abort,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerationFailure {
    /// 1-based position in the batch
    pub index: usize,
    pub name: String,
    pub error: String,
}

#[derive(Debug, Clone, Default)]
pub struct BatchOutcome {
    pub generated: Vec<GeneratedComponent>,
    pub failures: Vec<GenerationFailure>,
}

/// Runs a renderer over a batch of components and publishes progress.
///
/// Every event goes to `subscribe()` receivers; `current()` holds the last one.
/// Items are rendered strictly in order. Names that collide within a batch
/// are numbered (`app-x`, `app-x-2`, ...) so every output has its own files.
pub struct GenerationOrchestrator {
    renderer: Arc<dyn ComponentRenderer>,
    options: GenerationOptions,
    events: broadcast::Sender<GenerationProgress>,
    state: watch::Sender<GenerationProgress>,
}

impl Default for GenerationOrchestrator {
    fn default() -> Self {
        Self::new(Arc::new(TemplateGenerator::new()), GenerationOptions::default())
    }
}

impl GenerationOrchestrator {
    pub fn new(renderer: Arc<dyn ComponentRenderer>, options: GenerationOptions) -> Self {
        let (events, _) = broadcast::channel(EVENT_CAPACITY);
        let (state, _) = watch::channel(GenerationProgress::idle());
        Self {
            renderer,
            options,
            events,
            state,
        }
    }

    pub fn options(&self) -> &GenerationOptions {
        &self.options
    }

    pub fn subscribe(&self) -> broadcast::Receiver<GenerationProgress> {
        self.events.subscribe()
    }

    pub fn watch(&self) -> watch::Receiver<GenerationProgress> {
        self.state.subscribe()
    }

    pub fn current(&self) -> GenerationProgress {
        self.state.borrow().clone()
    }

    pub fn reset(&self) {
        self.publish(GenerationProgress::idle());
    }

    fn publish(&self, progress: GenerationProgress) {
        // No subscribers is fine
        let _ = self.events.send(progress.clone());
        self.state.send_replace(progress);
    }

    pub async fn generate_system(&self, design_system: &DesignSystem) -> Result<BatchOutcome> {
        info!(
            "🏭 Generating components for design system '{}'",
            design_system.name
        );
        self.generate_batch(&design_system.components).await
    }

    /// Same path and event shape as a batch, with one item.
    pub async fn generate_one(&self, component: &DesignComponent) -> Result<GeneratedComponent> {
        let mut outcome = self.generate_batch(std::slice::from_ref(component)).await?;

        match (outcome.generated.pop(), outcome.failures.pop()) {
            (Some(generated), _) => Ok(generated),
            (None, Some(failure)) => Err(ForgeError::Generation(format!(
                "{}: {}",
                failure.name, failure.error
            ))),
            (None, None) => Err(ForgeError::Generation(format!(
                "{}: nothing generated",
                component.name
            ))),
        }
    }

    pub async fn generate_batch(&self, components: &[DesignComponent]) -> Result<BatchOutcome> {
        let total = components.len();
        let mut outcome = BatchOutcome::default();
        let mut stems = HashSet::new();

        info!("📋 Generating {} components", total);
        self.publish(GenerationProgress {
            current: 0,
            total,
            current_component: String::new(),
            status: GenerationStatus::Generating,
            message: "Starting component generation...".to_string(),
        });

        for (i, component) in components.iter().enumerate() {
            let index = i + 1;

            if !self.options.item_delay.is_zero() {
                tokio::time::sleep(self.options.item_delay).await;
            }

            let rendered = Identifiers::for_component(component).and_then(|ids| {
                self.renderer
                    .render_as(component, &unique_identifiers(ids, &stems))
            });

            match rendered {
                Ok(generated) => {
                    info!("✅ [{}/{}] {}", index, total, component.name);
                    stems.insert(generated.file_stem().to_string());
                    outcome.generated.push(generated);
                    self.publish(GenerationProgress {
                        current: index,
                        total,
                        current_component: component.name.clone(),
                        status: GenerationStatus::Generating,
                        message: format!("Generated {}", component.name),
                    });
                }
                Err(e) => {
                    self.publish(GenerationProgress {
                        current: index,
                        total,
                        current_component: component.name.clone(),
                        status: GenerationStatus::Error,
                        message: format!("Failed to generate {}: {}", component.name, e),
                    });

                    match self.options.policy {
                        FailurePolicy::Abort => {
                            error!("❌ [{}/{}] {} failed: {}", index, total, component.name, e);
                            return Err(ForgeError::Generation(format!(
                                "{}: {}",
                                component.name, e
                            )));
                        }
                        FailurePolicy::Continue => {
                            warn!("⚠️  [{}/{}] {} skipped: {}", index, total, component.name, e);
                            outcome.failures.push(GenerationFailure {
                                index,
                                name: component.name.clone(),
                                error: e.to_string(),
                            });
                        }
                    }
                }
            }
        }

        let message = if outcome.failures.is_empty() {
            format!("Successfully generated {} components!", outcome.generated.len())
        } else {
            format!(
                "Generated {} of {} components, {} failed",
                outcome.generated.len(),
                total,
                outcome.failures.len()
            )
        };
        info!("🎉 {}", message);

        self.publish(GenerationProgress {
            current: total,
            total,
            current_component: String::new(),
            status: GenerationStatus::Completed,
            message,
        });

        Ok(outcome)
    }
}

fn unique_identifiers(ids: Identifiers, taken: &HashSet<String>) -> Identifiers {
    let mut candidate = ids.clone();
    let mut n = 2;
    while taken.contains(&candidate.css_class) {
        candidate = ids.with_suffix(n);
        n += 1;
    }
    candidate
}

#[cfg(test)]
mod tests {
    use super::*;
    use figforge_core::Category;

    /// Fails on the given 1-based positions, counted across calls.
    struct FailingRenderer {
        fail_on: Vec<usize>,
        calls: std::sync::Mutex<usize>,
        inner: TemplateGenerator,
    }

    impl FailingRenderer {
        fn new(fail_on: Vec<usize>) -> Self {
            Self {
                fail_on,
                calls: std::sync::Mutex::new(0),
                inner: TemplateGenerator::new(),
            }
        }
    }

    impl ComponentRenderer for FailingRenderer {
        fn render_as(
            &self,
            component: &DesignComponent,
            ids: &Identifiers,
        ) -> Result<GeneratedComponent> {
            let mut calls = self.calls.lock().unwrap();
            *calls += 1;
            if self.fail_on.contains(&*calls) {
                return Err(ForgeError::Generation("boom".to_string()));
            }
            self.inner.render_as(component, ids)
        }
    }

    fn components(n: usize) -> Vec<DesignComponent> {
        (1..=n)
            .map(|i| DesignComponent::new(format!("Buttons/B{}", i), &Category::Button, format!("1:{}", i)))
            .collect()
    }

    fn drain(rx: &mut broadcast::Receiver<GenerationProgress>) -> Vec<GenerationProgress> {
        let mut events = Vec::new();
        while let Ok(event) = rx.try_recv() {
            events.push(event);
        }
        events
    }

    #[tokio::test]
    async fn test_batch_emits_start_items_and_completion() {
        let orchestrator = GenerationOrchestrator::default();
        let mut rx = orchestrator.subscribe();

        let outcome = orchestrator.generate_batch(&components(3)).await.unwrap();
        let events = drain(&mut rx);

        assert_eq!(outcome.generated.len(), 3);
        assert_eq!(events.len(), 5);
        assert_eq!((events[0].current, events[0].status), (0, GenerationStatus::Generating));
        assert_eq!(events[2].current_component, "Buttons/B2");
        assert_eq!((events[4].current, events[4].total), (3, 3));
        assert_eq!(events[4].status, GenerationStatus::Completed);
        assert_eq!(orchestrator.current().status, GenerationStatus::Completed);
    }

    #[tokio::test]
    async fn test_abort_on_third_of_five() {
        let orchestrator = GenerationOrchestrator::new(
            Arc::new(FailingRenderer::new(vec![3])),
            GenerationOptions::default(),
        );
        let mut rx = orchestrator.subscribe();

        let result = orchestrator.generate_batch(&components(5)).await;
        let events = drain(&mut rx);

        assert!(result.is_err());
        assert_eq!(events.len(), 4);
        let last = events.last().unwrap();
        assert_eq!(last.status, GenerationStatus::Error);
        assert_eq!(last.current, 3);
        assert_eq!(last.current_component, "Buttons/B3");
        assert!(events.iter().all(|e| e.current <= 3));
        assert_eq!(orchestrator.current().status, GenerationStatus::Error);
    }

    #[tokio::test]
    async fn test_continue_records_failures_with_monotonic_progress() {
        let orchestrator = GenerationOrchestrator::new(
            Arc::new(FailingRenderer::new(vec![2, 4])),
            GenerationOptions {
                policy: FailurePolicy::Continue,
                ..Default::default()
            },
        );
        let mut rx = orchestrator.subscribe();

        let outcome = orchestrator.generate_batch(&components(5)).await.unwrap();
        let events = drain(&mut rx);

        assert_eq!(outcome.generated.len(), 3);
        assert_eq!(
            outcome.failures.iter().map(|f| f.index).collect::<Vec<_>>(),
            vec![2, 4]
        );
        for pair in events.windows(2) {
            assert!(pair[1].current >= pair[0].current);
        }
        assert!(events.iter().all(|e| e.current <= e.total));
        assert_eq!(events.last().unwrap().status, GenerationStatus::Completed);
    }

    #[tokio::test]
    async fn test_generate_one_and_reset() {
        let orchestrator = GenerationOrchestrator::default();
        let mut rx = orchestrator.subscribe();
        let component = DesignComponent::new("Icons/Star", &Category::Icon, "1:1");

        let generated = orchestrator.generate_one(&component).await.unwrap();
        assert!(generated.typescript.contains("IconsStarComponent"));

        let events = drain(&mut rx);
        assert_eq!(events.len(), 3);
        assert_eq!(events[1].current, 1);
        assert_eq!(events[2].total, 1);

        orchestrator.reset();
        assert_eq!(orchestrator.current(), GenerationProgress::idle());
    }

    #[tokio::test]
    async fn test_generate_one_failure_under_continue() {
        let orchestrator = GenerationOrchestrator::new(
            Arc::new(FailingRenderer::new(vec![1])),
            GenerationOptions {
                policy: FailurePolicy::Continue,
                ..Default::default()
            },
        );
        let component = DesignComponent::new("Icons/Star", &Category::Icon, "1:1");
        assert!(orchestrator.generate_one(&component).await.is_err());
    }

    #[tokio::test]
    async fn test_colliding_names_get_numbered_identifiers() {
        let orchestrator = GenerationOrchestrator::default();
        let batch = vec![
            DesignComponent::new("Buttons/Primary", &Category::Button, "1:1"),
            DesignComponent::new("Buttons Primary", &Category::Button, "1:2"),
            DesignComponent::new("buttons-primary", &Category::Button, "1:3"),
        ];

        let outcome = orchestrator.generate_batch(&batch).await.unwrap();
        let stems: Vec<&str> = outcome.generated.iter().map(|g| g.file_stem()).collect();
        assert_eq!(stems, vec!["buttons-primary", "buttons-primary-2", "buttons-primary-3"]);

        let second = &outcome.generated[1].typescript;
        assert!(second.contains("selector: 'app-buttons-primary-2'"));
        assert!(second.contains("templateUrl: './buttons-primary-2.component.html'"));
        assert!(second.contains("export class ButtonsPrimary2Component"));
    }

    #[tokio::test]
    async fn test_failed_item_does_not_reserve_its_name() {
        let orchestrator = GenerationOrchestrator::new(
            Arc::new(FailingRenderer::new(vec![1])),
            GenerationOptions {
                policy: FailurePolicy::Continue,
                ..Default::default()
            },
        );
        let batch = vec![
            DesignComponent::new("Cards/Basic", &Category::Card, "1:1"),
            DesignComponent::new("Cards Basic", &Category::Card, "1:2"),
        ];

        let outcome = orchestrator.generate_batch(&batch).await.unwrap();
        assert_eq!(outcome.generated.len(), 1);
        assert_eq!(outcome.generated[0].file_stem(), "cards-basic");
    }

    #[tokio::test]
    async fn test_empty_batch_completes() {
        let orchestrator = GenerationOrchestrator::default();
        let outcome = orchestrator.generate_batch(&[]).await.unwrap();

        assert!(outcome.generated.is_empty());
        let state = orchestrator.current();
        assert_eq!((state.current, state.total), (0, 0));
        assert_eq!(state.status, GenerationStatus::Completed);
    }
}
