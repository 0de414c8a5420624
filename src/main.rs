//! Storefront command-line front end.

use std::io::{self, Write};

use anyhow::{Result, anyhow};
use clap::Parser;
use storefront::{
    checkout::{self, CheckoutNotifier, MessageLinkNotifier, WriterNotifier},
    cli::{Command, StorefrontArgs, build_cart},
    config::Store,
    receipt::Receipt,
};
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    let args = StorefrontArgs::parse();

    init_tracing(&args.log_level)?;

    let store = match args.config.as_deref() {
        Some(path) => Store::from_path(path)?,
        None => Store::reference()?,
    };

    let stdout = io::stdout();
    let mut out = stdout.lock();

    match args.command {
        Command::Menu => {
            writeln!(out, "{}", store.name)?;
            store.catalog.write_to(&mut out)?;
        }
        Command::Quote(cart_args) => {
            let cart = build_cart(&store.catalog, &cart_args.items)?;

            Receipt::from_cart(&cart, &store.delivery)?.write_to(&mut out)?;
        }
        Command::Order(order_args) => {
            let cart = build_cart(&store.catalog, &order_args.cart.items)?;
            let details = order_args.order_details();

            let mut notifier: Box<dyn CheckoutNotifier> = match store.notify_phone.as_deref() {
                Some(phone) => Box::new(MessageLinkNotifier::new(phone, io::stdout())?),
                None => Box::new(WriterNotifier::new(io::stdout())),
            };

            let summary = checkout::submit(
                &store.name,
                &cart,
                &store.delivery,
                &details,
                notifier.as_mut(),
            )?;

            summary.write_to(&mut out)?;
        }
    }

    Ok(())
}

fn init_tracing(level: &str) -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::fmt()
        .compact()
        .with_target(true)
        .with_writer(io::stderr)
        .with_env_filter(filter)
        .try_init()
        .map_err(|err| anyhow!(err))
}
