use checkgen::{generate_checks, CheckGenConfig, LineProcessor};
use proptest::prelude::*;

/// A function with `args` arguments whose body adds them pairwise.
fn function(name: &str, args: usize) -> String {
    let params: Vec<String> = (0..args).map(|i| format!("%arg{i}: i32")).collect();
    let mut text = format!("func.func @{name}({}) -> i32 {{\n", params.join(", "));
    for i in 1..args {
        text.push_str(&format!("  %{i} = arith.addi %arg{}, %arg{i} : i32\n", i - 1));
    }
    text.push_str("  return %arg0 : i32\n}\n");
    text
}

fn module_strategy() -> impl Strategy<Value = String> {
    prop::collection::vec(1usize..5, 1..6).prop_map(|arities| {
        arities
            .iter()
            .enumerate()
            .map(|(i, &args)| function(&format!("f{i}"), args))
            .collect()
    })
}

proptest! {
    #[test]
    fn prop_generation_is_deterministic(module in module_strategy()) {
        let config = CheckGenConfig::default();
        let first = generate_checks(&module, &config).unwrap();
        let second = generate_checks(&module, &config).unwrap();
        prop_assert_eq!(first, second);
    }

    #[test]
    fn prop_every_segment_starts_at_val_0(module in module_strategy()) {
        let config = CheckGenConfig::default();
        let mut processor = LineProcessor::new(&config);
        processor.process_input(&module).unwrap();

        let segments = processor.segments();
        prop_assert!(segments[0].is_empty());
        for segment in &segments[1..] {
            prop_assert!(segment[0].contains("%[[VAL_0:.*]]"), "{}", segment[0]);
        }
    }

    #[test]
    fn prop_old_checks_do_not_duplicate(module in module_strategy()) {
        let config = CheckGenConfig::default();
        let checks = generate_checks(&module, &config).unwrap();
        let combined = format!("{checks}{module}");
        prop_assert_eq!(generate_checks(&combined, &config).unwrap(), checks);
    }

    #[test]
    fn prop_double_brackets_are_always_escaped(text in "[a-z0-9 ,=:\\[\\]]{1,40}") {
        let output = generate_checks(&text, &CheckGenConfig::default()).unwrap();
        prop_assert!(!output.contains("[["), "{}", output);
    }

    #[test]
    fn prop_nested_uses_resolve_to_definition(depth in 1usize..6) {
        let mut input = String::from("func.func @f(%v: i32) {\n");
        for _ in 0..depth {
            input.push_str("op {\n");
        }
        input.push_str("use %v\n");
        for _ in 0..depth {
            input.push_str("}\n");
        }
        input.push_str("}\n");

        let output = generate_checks(&input, &CheckGenConfig::default()).unwrap();
        prop_assert!(output.contains("use %[[VAL_0]]"), "{}", output);
        prop_assert_eq!(output.matches(":.*]]").count(), 1);
    }
}
