//! Parameter resolution through the container

use tether::prelude::*;

use crate::fixtures::{FileTransport, Greeter, Logger, Mailer, Needy, Notifier, SmtpTransport, container};

#[test]
fn test_default_scalar_is_used_without_overrides() {
    let container = container();
    let greeter = container.make("Greeter", Arguments::new()).unwrap();
    assert_eq!(greeter.downcast::<Greeter>().unwrap().name, "world");
}

#[test]
fn test_positional_override_replaces_default() {
    let container = container();
    let greeter = container.make("Greeter", Arguments::new().at(0, "Ada")).unwrap();
    assert_eq!(greeter.downcast::<Greeter>().unwrap().name, "Ada");
}

#[test]
fn test_named_override_replaces_default() {
    let container = container();
    let greeter = container
        .make("Greeter", Arguments::new().named("name", "Grace"))
        .unwrap();
    assert_eq!(greeter.downcast::<Greeter>().unwrap().name, "Grace");
}

#[test]
fn test_position_wins_over_name() {
    let container = container();
    let arguments = Arguments::new().named("name", "Grace").at(0, "Ada");
    let greeter = container.make("Greeter", arguments).unwrap();
    assert_eq!(greeter.downcast::<Greeter>().unwrap().name, "Ada");
}

#[test]
fn test_positional_override_skips_type_checking() {
    let container = container();
    let value = container.make("echo", Arguments::new().at(0, 42)).unwrap();
    assert_eq!(value.as_i64(), Some(42));
}

#[test]
fn test_class_parameter_is_resolved_through_container() {
    let container = container();
    let mailer = container.make("Mailer", Arguments::new()).unwrap();
    assert_eq!(mailer.downcast::<Mailer>().unwrap().logger.prefix, "log");
}

#[test]
fn test_bucket_without_type_key_feeds_first_candidate() {
    let container = container();
    let bucket = Arguments::new().named("prefix", "mail");
    let arguments = Arguments::new().named("$logger", bucket);
    let mailer = container.make("Mailer", arguments).unwrap();
    assert_eq!(mailer.downcast::<Mailer>().unwrap().logger.prefix, "mail");
}

#[test]
fn test_union_resolves_first_declared_type() {
    let container = container();
    let notifier = container.make("Notifier", Arguments::new()).unwrap();
    let notifier = notifier.downcast::<Notifier>().unwrap();
    assert_eq!(notifier.transport.class(), "SmtpTransport");
    assert_eq!(
        notifier.transport.downcast_ref::<SmtpTransport>().unwrap().host,
        "localhost"
    );
}

#[test]
fn test_bucket_selects_union_branch() {
    let container = container();
    let arguments = Arguments::new().bucket(
        "transport",
        "FileTransport",
        Arguments::new().at(0, "/tmp/outbox"),
    );
    let notifier = container.make("Notifier", arguments).unwrap();
    let notifier = notifier.downcast::<Notifier>().unwrap();
    assert_eq!(notifier.transport.class(), "FileTransport");
    assert_eq!(
        notifier.transport.downcast_ref::<FileTransport>().unwrap().path,
        "/tmp/outbox"
    );
}

#[test]
fn test_overrides_from_json() {
    let container = container();
    let json = serde_json::json!({
        "$transport": { "FileTransport": { "path": "/srv/mail" } }
    });
    let arguments = Arguments::from_json(&json).unwrap();
    let notifier = container.make("Notifier", arguments).unwrap();
    let transport = &notifier.downcast::<Notifier>().unwrap().transport;
    assert_eq!(transport.downcast_ref::<FileTransport>().unwrap().path, "/srv/mail");
}

#[test]
fn test_malformed_bucket_is_build_failure() {
    let container = container();
    let error = container
        .make("Mailer", Arguments::new().named("$logger", "oops"))
        .unwrap_err();
    assert!(error.is_build_failure());
}

#[test]
fn test_live_object_is_used_verbatim_for_class_parameter() {
    let container = container();
    let logger = Instance::new("Logger", Logger { prefix: "audit".into() });
    let mailer = container
        .make("Mailer", Arguments::new().named("logger", logger))
        .unwrap();
    assert_eq!(mailer.downcast::<Mailer>().unwrap().logger.prefix, "audit");
}

#[test]
fn test_unknown_identifier_is_not_found() {
    let container = container();
    let error = container.make("UnknownClass", Arguments::new()).unwrap_err();
    assert!(error.is_not_found());
    assert!(!error.is_build_failure());
}

#[test]
fn test_missing_required_scalar_is_build_failure() {
    let container = container();
    let error = container.make("Needy", Arguments::new()).unwrap_err();
    assert!(error.is_build_failure());
    assert!(!error.is_not_found());
    assert!(error.to_string().contains("Parameter[count] of Needy::new"));

    let needy = container.make("Needy", Arguments::new().at(0, 3)).unwrap();
    assert_eq!(needy.downcast::<Needy>().unwrap().count, 3);
}

#[test]
fn test_nested_failure_carries_trail() {
    let container = container();
    let error = container.make("Report", Arguments::new()).unwrap_err();
    assert!(error.is_build_failure());
    assert_eq!(error.trail().unwrap().to_string(), "Report > Needy");
}

#[test]
fn test_unknown_dependency_is_build_failure() {
    let container = container();
    let error = container.make("Orphan", Arguments::new()).unwrap_err();
    assert!(error.is_build_failure());
    let source = std::error::Error::source(&error).unwrap().to_string();
    assert!(source.contains("Ghost"));
}

#[test]
fn test_non_instantiable_classes_are_build_failures() {
    let container = container();
    for class in ["Transport", "Vault", "Opaque"] {
        let error = container.make(class, Arguments::new()).unwrap_err();
        assert!(error.is_build_failure(), "{class}: {error}");
        assert!(!container.is_resolvable(class));
    }
}

#[test]
fn test_functions_resolve_and_deprecated_ones_do_not() {
    let container = container();
    let value = container.make("shout", Arguments::new().at(0, "hey")).unwrap();
    assert_eq!(value.as_str(), Some("HEY"));

    assert!(container.make("legacy", Arguments::new()).unwrap_err().is_build_failure());
}

#[test]
fn test_cycle_is_detected() {
    let container = container();
    let error = container.make("Chicken", Arguments::new()).unwrap_err();
    assert!(matches!(error, Error::CircularDependency { .. }));
    assert_eq!(error.trail().unwrap().to_string(), "Chicken > Egg > Chicken");
}

#[test]
fn test_depth_bound_applies_without_cycle_detection() {
    use std::sync::Arc;
    use tether::infrastructure::config::ResolutionConfig;

    let resolution = ResolutionConfig {
        detect_cycles: false,
        max_depth: 8,
        cache_resolvers: true,
    };
    let container = Container::with_resolution(Arc::new(crate::fixtures::table()), resolution);
    let error = container.make("Chicken", Arguments::new()).unwrap_err();
    assert!(matches!(error, Error::Resolved { .. }));
    assert_eq!(error.trail().unwrap().frames().len(), 8);
}
