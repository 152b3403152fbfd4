use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use ludo_api_core::{color_property, scale_property, Scale, Value};
use ludo_runtime_core::{
    parse_view_json, AnimationSpec, AttributeSchema, ButtonId, ButtonPhase, Canvas, Config,
    MapViewSource, Model, ModelRegistry, ModelType, NullViewSource, RuntimeEvent, SceneCommand,
    SceneDef, SceneError, SceneRegistry, TransitionRequest, Window,
};

struct RecordingCanvas {
    names: Vec<String>,
}

impl Canvas for RecordingCanvas {
    fn draw_model(&mut self, model: &Model) {
        self.names.push(model.name().to_string());
    }
}

fn model_registry() -> ModelRegistry {
    let mut reg = ModelRegistry::new();
    reg.register(ModelType::new(
        "label",
        AttributeSchema::new()
            .property(scale_property("scale"))
            .property(color_property("color")),
    ));
    reg.register(ModelType::new(
        "sprite",
        AttributeSchema::new().property(color_property("color")),
    ));
    reg
}

fn view_source() -> MapViewSource {
    let mut src = MapViewSource::new();
    for name in ludo_test_fixtures::view_names() {
        let json = ludo_test_fixtures::view_json(&name).unwrap();
        src.insert(name, parse_view_json(&json).unwrap());
    }
    src
}

fn window_with(scenes: SceneRegistry) -> Window {
    Window::new(
        Config::default(),
        model_registry(),
        scenes,
        Box::new(view_source()),
    )
}

/// it should build models in view order and coerce typed attributes through the schema
#[test]
fn activation_builds_typed_models_in_view_order() {
    let mut scenes = SceneRegistry::new();
    scenes.register(SceneDef::new("main_menu"));
    let mut win = window_with(scenes);
    win.set_scene("main_menu").unwrap();

    let scene = win.scene().unwrap();
    assert_eq!(scene.models().len(), 2);
    let title = scene.models().get("title").unwrap();
    assert_eq!(title.get("scale"), Some(&Value::Scale(Scale::new(2.0, 2.0))));
    assert_eq!(title.get("x"), Some(&Value::f(120.0)));

    let mut canvas = RecordingCanvas { names: Vec::new() };
    win.draw(&mut canvas);
    assert_eq!(canvas.names, ["title", "cursor"]);
}

/// it should dispatch a held event every frame while the button stays down
#[test]
fn held_buttons_dispatch_per_frame() {
    let held = Arc::new(AtomicUsize::new(0));
    let counter = held.clone();

    let mut scenes = SceneRegistry::new();
    scenes.register(SceneDef::new("main_menu").on_button(
        ButtonId(5),
        ButtonPhase::Held,
        move |_ctx| {
            counter.fetch_add(1, Ordering::SeqCst);
            Vec::new()
        },
    ));
    let mut win = window_with(scenes);
    win.set_scene("main_menu").unwrap();

    win.button_down(ButtonId(5));
    assert!(win.scene().unwrap().event_manager().is_held(ButtonId(5)));
    win.update(1.0);
    win.update(1.0);
    assert_eq!(held.load(Ordering::SeqCst), 2);

    win.button_up(ButtonId(5));
    assert!(!win.scene().unwrap().event_manager().is_held(ButtonId(5)));
    win.update(1.0);
    assert_eq!(held.load(Ordering::SeqCst), 2);
}

/// it should fire pressed exactly once per physical press, at the host callback
#[test]
fn pressed_is_one_shot() {
    let pressed = Arc::new(AtomicUsize::new(0));
    let counter = pressed.clone();

    let mut scenes = SceneRegistry::new();
    scenes.register(SceneDef::new("main_menu").on_button(
        ButtonId(3),
        ButtonPhase::Pressed,
        move |_ctx| {
            counter.fetch_add(1, Ordering::SeqCst);
            Vec::new()
        },
    ));
    let mut win = window_with(scenes);
    win.set_scene("main_menu").unwrap();

    win.button_down(ButtonId(3));
    assert_eq!(pressed.load(Ordering::SeqCst), 1);
    win.update(1.0);
    win.update(1.0);
    assert_eq!(pressed.load(Ordering::SeqCst), 1);
}

/// it should tolerate a release without a prior press
#[test]
fn spurious_release_does_not_panic() {
    let mut scenes = SceneRegistry::new();
    scenes.register(SceneDef::new("main_menu"));
    let mut win = window_with(scenes);
    win.set_scene("main_menu").unwrap();

    win.button_up(ButtonId(9));
    win.update(1.0);
}

/// it should defer a transition requested by a completion hook to the update boundary
#[test]
fn transition_from_completion_is_deferred() {
    let mut scenes = SceneRegistry::new();
    scenes.register(
        SceneDef::new("splash").animation(
            AnimationSpec::new("logo")
                .attr("color", Value::color(255.0, 255.0, 255.0, 1.0))
                .duration(0.0)
                .on_complete(|_| {
                    vec![SceneCommand::Transition(TransitionRequest::to("main_menu"))]
                }),
        ),
    );
    scenes.register(SceneDef::new("main_menu"));
    let mut win = window_with(scenes);
    win.set_scene("splash").unwrap();
    assert_eq!(win.scene().unwrap().name(), "splash");

    let events = win.update(1.0).events.clone();
    assert_eq!(win.scene().unwrap().name(), "main_menu");
    assert!(events
        .iter()
        .any(|e| matches!(e, RuntimeEvent::TransitionRequested { to, .. } if to == "main_menu")));
    assert!(events
        .iter()
        .any(|e| matches!(e, RuntimeEvent::SceneActivated { scene } if scene == "main_menu")));

    // the draw immediately after that update sees the new scene's models
    let mut canvas = RecordingCanvas { names: Vec::new() };
    win.draw(&mut canvas);
    assert_eq!(canvas.names, ["title", "cursor"]);
}

/// it should carry transition options into the next scene
#[test]
fn transition_options_reach_the_next_scene() {
    let mut scenes = SceneRegistry::new();
    scenes.register(
        SceneDef::new("splash").animation(
            AnimationSpec::new("logo")
                .attr("x", Value::f(0.0))
                .duration(0.0)
                .on_complete(|_| {
                    vec![SceneCommand::Transition(
                        TransitionRequest::to("main_menu").option("score", Value::f(99.0)),
                    )]
                }),
        ),
    );
    scenes.register(SceneDef::new("main_menu"));
    let mut win = window_with(scenes);
    win.set_scene("splash").unwrap();
    win.update(1.0);

    let opts = win.scene().unwrap().options();
    assert_eq!(opts, [("score".to_string(), Value::f(99.0))]);
}

/// it should report a deferred transition to an unregistered scene and keep the prior one
#[test]
fn transition_to_unregistered_scene_is_reported() {
    let mut scenes = SceneRegistry::new();
    scenes.register(
        SceneDef::new("splash").animation(
            AnimationSpec::new("logo")
                .attr("x", Value::f(0.0))
                .duration(0.0)
                .on_complete(|_| {
                    vec![SceneCommand::Transition(TransitionRequest::to(
                        "no_such_scene",
                    ))]
                }),
        ),
    );
    let mut win = window_with(scenes);
    win.set_scene("splash").unwrap();

    let events = win.update(1.0).events.clone();
    assert_eq!(win.scene().unwrap().name(), "splash");
    assert!(events
        .iter()
        .any(|e| matches!(e, RuntimeEvent::TransitionRequested { to, .. } if to == "no_such_scene")));
    assert!(events
        .iter()
        .any(|e| matches!(e, RuntimeEvent::SceneActivationFailed { scene, .. } if scene == "no_such_scene")));
}

/// it should start an animation queued from a completion on the next frame
#[test]
fn chained_animation_starts_next_frame() {
    let mut scenes = SceneRegistry::new();
    scenes.register(
        SceneDef::new("main_menu").animation(
            AnimationSpec::new("title")
                .attr("x", Value::f(0.0))
                .duration(0.0)
                .on_complete(|_| {
                    vec![SceneCommand::StartAnimation(Arc::new(
                        AnimationSpec::new("title").attr("y", Value::f(200.0)).duration(2.0),
                    ))]
                }),
        ),
    );
    let mut win = window_with(scenes);
    win.set_scene("main_menu").unwrap();

    // frame 1: first animation completes; the chained one is only started
    win.update(1.0);
    let scene = win.scene().unwrap();
    assert_eq!(scene.animations().len(), 2);
    assert!(scene.animations()[0].is_completed());
    assert!(!scene.animations()[1].is_completed());
    let y = scene.models().get("title").unwrap().get("y");
    assert_eq!(y, Some(&Value::f(40.0))); // still the view's value

    // frame 2: the chained animation ticks
    win.update(1.0);
    let y = win.scene().unwrap().models().get("title").unwrap().get("y");
    assert_eq!(y, Some(&Value::f(120.0))); // halfway from 40 to 200
}

/// it should substitute the generic model type for an unknown view entry
#[test]
fn unknown_model_type_degrades_to_generic() {
    let mut scenes = SceneRegistry::new();
    scenes.register(SceneDef::new("splash"));
    let mut win = window_with(scenes);
    win.set_scene("splash").unwrap();

    assert!(win
        .outputs()
        .events
        .iter()
        .any(|e| matches!(e, RuntimeEvent::ModelTypeFallback { requested } if requested == "starfield")));

    let scene = win.scene().unwrap();
    let stars = scene.models().get("stars").unwrap();
    assert_eq!(stars.type_name(), "model");
    assert_eq!(stars.get("density"), Some(&Value::f(0.25)));

    // generic models still participate in update and draw
    win.update(1.0);
    let mut canvas = RecordingCanvas { names: Vec::new() };
    win.draw(&mut canvas);
    assert_eq!(canvas.names, ["logo", "stars"]);
}

/// it should substitute the empty view when the view cannot be located
#[test]
fn missing_view_degrades_to_empty_scene() {
    let mut scenes = SceneRegistry::new();
    scenes.register(SceneDef::new("settings"));
    let mut win = Window::new(
        Config::default(),
        model_registry(),
        scenes,
        Box::new(NullViewSource),
    );
    win.set_scene("settings").unwrap();

    assert!(win
        .outputs()
        .events
        .iter()
        .any(|e| matches!(e, RuntimeEvent::ViewFallback { view } if view == "settings")));
    assert!(win.scene().unwrap().models().is_empty());
    win.update(1.0);
}

/// it should make view and model-type fallbacks fatal under strict_views
#[test]
fn strict_views_makes_fallbacks_fatal() {
    let mut cfg = Config::default();
    cfg.features.strict_views = true;

    let mut scenes = SceneRegistry::new();
    scenes.register(SceneDef::new("main_menu"));
    scenes.register(SceneDef::new("settings"));
    let mut win = Window::new(cfg, model_registry(), scenes, Box::new(view_source()));

    win.set_scene("main_menu").unwrap();
    let err = win.set_scene("settings").unwrap_err();
    assert!(matches!(err, SceneError::MissingView(_)));
    // the prior scene stays active
    assert_eq!(win.scene().unwrap().name(), "main_menu");
}

/// it should reject an animation against a missing model under strict_views
#[test]
fn strict_views_rejects_missing_animation_target() {
    let mut cfg = Config::default();
    cfg.features.strict_views = true;

    let mut scenes = SceneRegistry::new();
    scenes.register(
        SceneDef::new("main_menu")
            .animation(AnimationSpec::new("ghost").attr("x", Value::f(1.0)).duration(1.0)),
    );
    let mut win = Window::new(cfg, model_registry(), scenes, Box::new(view_source()));

    let err = win.set_scene("main_menu").unwrap_err();
    assert!(matches!(err, SceneError::UnknownTargetModel { .. }));
    assert!(win.scene().is_none());
}

/// it should report an unregistered scene name as an error
#[test]
fn unknown_scene_name_is_an_error() {
    let scenes = SceneRegistry::new();
    let mut win = window_with(scenes);
    assert!(matches!(
        win.set_scene("ghost"),
        Err(SceneError::NoSuchScene(_))
    ));
    assert!(win
        .outputs()
        .events
        .iter()
        .any(|e| matches!(e, RuntimeEvent::SceneActivationFailed { scene, .. } if scene == "ghost")));
    // window without a scene swallows callbacks
    win.update(1.0);
    win.button_down(ButtonId(1));
    let mut canvas = RecordingCanvas { names: Vec::new() };
    win.draw(&mut canvas);
    assert!(canvas.names.is_empty());
}

/// it should route notifications to the registered handler and ignore the rest
#[test]
fn notifications_dispatch_or_no_op() {
    let mut scenes = SceneRegistry::new();
    scenes.register(SceneDef::new("main_menu").on_notify(
        "title",
        "blink",
        |model| {
            model.set_value("visible", Value::Bool(false));
            Vec::new()
        },
    ));
    let mut win = window_with(scenes);
    win.set_scene("main_menu").unwrap();

    // unregistered event and model: silent no-ops
    win.notify("explode", "title");
    win.notify("blink", "cursor");

    win.notify("blink", "title");
    let title = win.scene().unwrap().models().get("title").unwrap();
    assert_eq!(title.get("visible"), Some(&Value::Bool(false)));
}
