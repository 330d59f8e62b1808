//! Basic Wasla wiring: an instance, an autowired class chain, a factory.

use std::sync::Arc;

use wasla::prelude::*;

#[derive(Debug)]
struct Config {
    database_url: String,
}

struct Database {
    config: Arc<Config>,
}

impl Database {
    fn query(&self, sql: &str) -> String {
        format!("[{}] {sql}", self.config.database_url)
    }
}

impl Newable for Database {
    fn arity() -> usize {
        1
    }

    fn assemble(args: &mut ArgList) -> Result<Self> {
        Ok(Self {
            config: args.take::<Config>()?,
        })
    }
}

impl Injectable for Database {
    fn dependencies() -> Vec<ServiceKey> {
        vec![ServiceKey::of::<Config>()]
    }
}

struct UserRepository {
    db: Arc<Database>,
}

impl UserRepository {
    fn find_user(&self, id: u64) -> String {
        self.db.query(&format!("SELECT * FROM users WHERE id = {id}"))
    }
}

impl Newable for UserRepository {
    fn arity() -> usize {
        1
    }

    fn assemble(args: &mut ArgList) -> Result<Self> {
        Ok(Self {
            db: args.take::<Database>()?,
        })
    }
}

impl Injectable for UserRepository {
    fn dependencies() -> Vec<ServiceKey> {
        vec![ServiceKey::of::<Database>()]
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter("wasla=debug")
        .init();

    let mut builder = Container::builder();

    // Pre-built configuration, shared by every lookup.
    builder.register_type::<Config>().use_instance(Config {
        database_url: "postgres://localhost/app".to_string(),
    });

    // Classes with autowired dependency lists.
    builder.register_type::<Database>().use_class::<Database>();
    builder
        .register_type::<UserRepository>()
        .use_class::<UserRepository>();

    // A factory, invoked afresh on every lookup.
    builder
        .register(ServiceKey::labeled::<String>("request_id"))
        .use_factory(|| format!("req-{}", std::process::id()));

    let container = builder.build()?;
    println!("container: {container:?}");

    let repo = container.get::<UserRepository>()?;
    println!("{}", repo.find_user(42));

    let request_id = container.get_labeled::<String>("request_id")?;
    println!("request id: {request_id}");

    // Each class lookup wires a brand new tree.
    let another = container.get::<UserRepository>()?;
    assert!(!Arc::ptr_eq(&repo, &another));

    Ok(())
}
