use pollen::{global, Registry};

// By accepting a `&Registry`, this function can run against a registry
// scoped to a single request or test instead of the global one.
fn process_data(registry: &Registry) -> pollen::Result<String> {
  registry.add_value("data", "test data".to_string())?;

  let data = registry.get::<String>("data")?;
  Ok(format!("Processed: {}", data.to_uppercase()))
}

fn main() -> pollen::Result<()> {
  println!("--- Running with a scoped registry ---");
  let scoped = Registry::new();
  let result = process_data(&scoped)?;

  println!("Result: {}", result);
  assert_eq!(result, "Processed: TEST DATA");

  // The value registered in `scoped` must not exist in the global registry.
  assert!(
    !global().has("data"),
    "Dependency should not have leaked into the global registry!"
  );

  println!("\nVerified that the scoped registry is isolated from the global one.");
  Ok(())
}
