use pollen::{Definition, Registry, RegistryError};

// The arguments a configurable factory accepts at resolution time.
struct ConnectionArgs {
  host: &'static str,
  port: u16,
}

struct Connection {
  url: String,
}

fn main() -> pollen::Result<()> {
  tracing_subscriber::fmt()
    .with_env_filter(
      tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("pollen=trace")),
    )
    .init();

  let registry = Registry::new();
  registry.add_value("scheme", String::from("postgres"))?;
  registry.add_configurable("connection", |registry, args: ConnectionArgs| {
    let scheme = registry
      .get::<String>("scheme")
      .map(|scheme| (*scheme).clone())
      .unwrap_or_default();
    Connection {
      url: format!("{}://{}:{}", scheme, args.host, args.port),
    }
  })?;

  // Every resolution builds a new connection from the arguments given.
  let primary = registry.get_with::<Connection, _>(
    "connection",
    ConnectionArgs {
      host: "primary",
      port: 5432,
    },
  )?;
  let replica = registry.get_with::<Connection, _>(
    "connection",
    ConnectionArgs {
      host: "replica",
      port: 5433,
    },
  )?;
  println!("{} / {}", primary.url, replica.url);

  // Arguments make a factory configurable, and configurable factories can not be shared.
  let shared = Definition::configurable(|_, args: ConnectionArgs| args.port);
  match registry.register("port", shared, true) {
    Err(RegistryError::ConfigurableShared) => println!("shared configurable factory rejected"),
    other => panic!("unexpected outcome: {:?}", other),
  }
  Ok(())
}
