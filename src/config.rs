use std::{env, net::{SocketAddr, ToSocketAddrs as _}};

use rust_decimal::Decimal;
use sea_orm::ConnectOptions;
use tracing::info;

use crate::billing::RateConfig;

pub struct Config {
    pub host_address: SocketAddr,

    pub database_opt: ConnectOptions,

    pub jwt_key: String,

    pub rates: RateConfig,
}

pub fn load() -> Config {
    Config {
        host_address: load_host_address(),
        database_opt: load_database_opt().into(),
        jwt_key: load_jwt_key(),
        rates: load_rates(),
    }
}

fn load_host_address() -> SocketAddr {
    info!("Loading environment `HOST_ADDRESS`");

    let var = env::var("HOST_ADDRESS").unwrap_or_else(|_| "127.0.0.1:0".to_string());

    var.to_socket_addrs()
        .expect("`HOST_ADDRESS` is not in a valid format").nth(0)
        .expect("unable to resolve host from `HOST_ADDRESS`")
}

fn load_database_opt() -> impl Into<ConnectOptions> {
    info!("Loading environment `DATABASE_URL`");

    let var = env::var("DATABASE_URL").expect("Environment `DATABASE_URL` is required to be set");

    var
}

fn load_jwt_key() -> String {
    info!("Loading environment `JWT_SECRET`");

    let var = env::var("JWT_SECRET").expect("Environment `JWT_SECRET` is required to be set");

    var
}

/// Premium multipliers, the overtime rate basis and the commission rate
/// are deployment decisions; there is no sensible default to assume, so
/// all four are required.
fn load_rates() -> RateConfig {
    RateConfig {
        weekend_multiplier: load_decimal("WEEKEND_RATE_MULTIPLIER"),
        holiday_multiplier: load_decimal("HOLIDAY_RATE_MULTIPLIER"),
        overtime_day_hours: load_decimal("OVERTIME_DAY_HOURS"),
        commission_rate: load_decimal("COMMISSION_RATE"),
    }
}

fn load_decimal(name: &str) -> Decimal {
    info!("Loading environment `{name}`");

    let var = env::var(name).unwrap_or_else(|_| panic!("Environment `{name}` is required to be set"));

    var.parse()
        .unwrap_or_else(|_| panic!("Environment `{name}` is not a valid decimal number"))
}
