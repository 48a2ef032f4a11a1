use pawlog::{Error, LogBuffer, paw, paw_config};

#[test]
fn test_global_lifecycle() {
    // every access before init fails
    assert!(matches!(paw(), Err(Error::NotInitialized)));
    assert!(matches!(paw(), Err(Error::NotInitialized)));

    let buffer = LogBuffer::new();
    let first = paw_config()
        .with_name("APP")
        .with_max_stack_traces(2)
        .with_show_name(true)
        .with_enabled(true)
        .with_colors(false)
        .with_writer(buffer.clone())
        .init_global();
    let confirmation = buffer.lines();
    assert_eq!(confirmation.len(), 1);
    assert!(confirmation[0].contains("[ INFO  ]"));
    assert!(confirmation[0].contains("lifecycle.rs:"));
    assert!(confirmation[0].ends_with("Paw initialized"));

    let other = LogBuffer::new();
    let second = paw_config()
        .with_name("OTHER")
        .with_max_stack_traces(9)
        .with_show_name(false)
        .with_writer(other.clone())
        .init_global();
    let third = pawlog::init(Some("THIRD"), Some(1), Some(false));
    assert!(std::ptr::eq(first, second));
    assert!(std::ptr::eq(first, third));
    assert!(other.lines().is_empty());

    let config = paw().unwrap().config();
    assert_eq!(config.name, "APP");
    assert_eq!(config.max_stack_traces, 2);
    assert!(config.show_name);

    buffer.clear();
    paw().unwrap().info("ready", None);
    let lines = buffer.lines();
    assert_eq!(lines.len(), 1);
    assert!(lines[0].contains("APP"));
    assert!(lines[0].contains("INFO"));
    assert!(lines[0].contains("ready"));

    buffer.clear();
    log::warn!("through the facade");
    log::trace!("traced");
    let lines = buffer.lines();
    assert_eq!(lines.len(), 2);
    assert!(lines[0].starts_with("[APP] [ WARN  ] "));
    assert!(lines[0].contains("lifecycle.rs:"));
    assert!(lines[0].ends_with(" | through the facade"));
    assert!(lines[1].contains("[ DEBUG ]"));
}
