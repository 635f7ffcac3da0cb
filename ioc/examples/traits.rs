use pollen::{global, resolve, Identifier};
use std::sync::Arc;

// 1. Define the abstraction (the trait)
trait Logger: Send + Sync {
  fn log(&self, message: &str);
}

// 2. Define a concrete implementation
struct ConsoleLogger;
impl Logger for ConsoleLogger {
  fn log(&self, message: &str) {
    println!("[CONSOLE LOG]: {}", message);
  }
}

// 3. Define a service that depends on the abstraction
struct ReportService {
  logger: Arc<dyn Logger>,
}

impl ReportService {
  fn generate_report(&self) {
    self.logger.log("Starting report generation.");
    self.logger.log("Finished report generation.");
  }
}

fn main() -> pollen::Result<()> {
  // Serve ConsoleLogger as `dyn Logger`, keyed by the trait's own name.
  global().add_shared_arc::<dyn Logger>(Identifier::of::<dyn Logger>(), |_| {
    Arc::new(ConsoleLogger)
  })?;

  // The factory resolves its own dependency from the registry it is given.
  global().add_shared(Identifier::of::<ReportService>(), |registry| ReportService {
    logger: resolve!(trait Logger, Identifier::of::<dyn Logger>(), from: registry),
  })?;

  println!("Resolving {}...", Identifier::of::<ReportService>());
  let report_service = resolve!(ReportService, Identifier::of::<ReportService>());

  println!("Using the service...");
  report_service.generate_report();
  Ok(())
}
