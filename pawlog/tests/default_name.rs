#[test]
fn test_empty_name_falls_back() {
    let paw = pawlog::init(Some(""), Some(3), None);
    assert_eq!(paw.config().name, "PAW");
    assert_eq!(paw.config().max_stack_traces, 3);
    assert_eq!(pawlog::paw().unwrap().config().name, "PAW");
}
