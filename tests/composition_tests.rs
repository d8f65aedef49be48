//! Form engine option composition as seen by a mounted engine

mod common;

use common::*;
use form_guard::*;
use std::rc::Rc;

fn mount(options: FormOptions<MockForm>) -> (FormController<MockForm>, Rc<MemoryHistory>) {
    init_logging();
    let history = Rc::new(MemoryHistory::new());
    let controller = FormController::mount(options, history.clone());
    (controller, history)
}

#[test]
fn test_engine_receives_composed_decorators() {
    let (controller, _) = mount(options().decorator("calculate-totals"));
    assert_eq!(
        controller.form().config.decorators,
        vec!["focus-on-errors", "calculate-totals"]
    );
}

#[test]
fn test_engine_receives_array_mutators_on_top_of_caller_mutators() {
    let (controller, _) = mount(
        options()
            .mutator("setFieldData", "custom")
            .mutator("push", "custom"),
    );
    let mutators = &controller.form().config.mutators;
    assert_eq!(mutators.get("setFieldData"), Some(&"custom"));
    assert_eq!(mutators.get("push"), Some(&"array"));
    assert_eq!(mutators.get("remove"), Some(&"array"));
}

#[test]
fn test_engine_subscription_is_union_with_form_defaults() {
    let (controller, _) = mount(
        options()
            .subscribe_to(SubscriptionKey::Values)
            .subscribe_to(SubscriptionKey::Submitting),
    );
    let keys: Vec<_> = controller.form().config.subscription.iter().collect();
    assert_eq!(
        keys,
        vec![
            SubscriptionKey::InitialValues,
            SubscriptionKey::Pristine,
            SubscriptionKey::Submitting,
            SubscriptionKey::Values,
        ]
    );
}

#[test]
fn test_tracker_subscribes_with_observed_fields_only() {
    let (controller, _) = mount(options());
    let subscriptions = controller.form().subscriptions();
    assert_eq!(subscriptions.len(), 1);
    assert_eq!(subscriptions[0], FormStateTracker::observed());
}

#[test]
fn test_engine_options_reach_the_engine() {
    let settings = EngineSettings {
        validate_on_blur: true,
        keep_dirty_on_reinitialize: true,
    };
    let (controller, _) = mount(
        options()
            .engine_options(settings.clone())
            .navigation_check(true),
    );
    assert_eq!(controller.form().config.engine, settings);
    assert!(controller.is_guarding());
}

#[test]
fn test_submit_handler_and_initial_values_forwarded() {
    let values: Values = [("title".to_string(), "Draft".to_string())].into();
    let seen = Rc::new(std::cell::RefCell::new(None));
    let sink = Rc::clone(&seen);

    let (controller, _) = mount(
        FormOptions::new(move |v: &Values| {
            *sink.borrow_mut() = Some(v.clone());
            Err(SubmitErrors::from([(
                "title".to_string(),
                "already exists".to_string(),
            )]))
        })
        .initial_values(values.clone()),
    );

    assert_eq!(controller.form().config.initial_values, Some(values.clone()));
    let result = controller.form().submit();
    assert!(result.is_err());
    assert_eq!(*seen.borrow(), Some(values));
}

#[test]
fn test_submission_failure_is_not_interpreted() {
    // a failed submit leaves the form dirty and unsubmitted: still guarded
    let (controller, history) = mount(options().navigation_check(true));
    controller.form().emit(FormState {
        dirty: true,
        submit_failed: true,
        ..FormState::default()
    });
    assert!(history.navigate("/away").is_blocked());
}

#[test]
fn test_settings_are_exposed() {
    let (controller, _) = mount(
        options().settings(GuardSettings {
            navigation_check: true,
            bypass_routes: BypassRoutes::none().with("/sign-out"),
        }),
    );
    assert!(controller.settings().navigation_check);
    assert_eq!(controller.settings().bypass_routes.prefixes(), ["/sign-out"]);
}
