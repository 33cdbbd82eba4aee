use lotnorm::balance::Balance;
use lotnorm::config;
use lotnorm::exchangeinfo::ExchangeInfo;
use lotnorm::fee::TradeFee;
use lotnorm::order::{normalize_order, OrderRequest, Side};
use lotnorm::sizing;
use lotnorm::tradingrules::RulesBook;
use lotnorm::utils;
use lotnorm::NormalizeError;

use clap::{Parser, Subcommand};
use log::{error, info};
use rust_decimal::Decimal;

#[derive(Parser, Debug)]
#[command(name = "lotnorm", version, about = "Normalize orders against exchange trading rules")]
struct Cli {
    /// Configuration file.
    #[arg(long, default_value = config::DEFAULT_CONFIG_FILE)]
    config: String,

    /// exchangeInfo document, overrides [Rules] ExchangeInfo.
    #[arg(long)]
    exchange_info: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the trading rules of a symbol.
    Rules { symbol: String },

    /// Normalize a market order, or a limit order when --price is given.
    Normalize {
        symbol: String,
        side: Side,
        quantity: Decimal,
        #[arg(long)]
        price: Option<Decimal>,
    },

    /// Largest sellable quantity of a free balance.
    MaxSell {
        symbol: String,
        #[arg(required_unless_present = "balance")]
        free: Option<Decimal>,
        /// Account balance entry as JSON, e.g. {"asset":"DOGE","free":"19.8","locked":"0"}.
        #[arg(long, conflicts_with = "free")]
        balance: Option<String>,
    },

    /// Tradable quantity and fee for an amount.
    Simulate {
        symbol: String,
        side: Side,
        amount: Decimal,
        #[arg(long)]
        maker: Option<Decimal>,
        #[arg(long)]
        taker: Option<Decimal>,
    },

    /// Convert a quote amount to base quantity (buy) or base amount to quote proceeds (sell).
    Quote {
        side: Side,
        amount: Decimal,
        price: Decimal,
        /// Size a leveraged position instead: (amount * leverage) / price.
        #[arg(long)]
        leverage: Option<u32>,
    },
}

fn load_rules(path: &str) -> Result<RulesBook, Box<dyn std::error::Error>> {
    let doc = std::fs::read_to_string(path)?;
    let info = ExchangeInfo::from_json(&doc)?;
    let book = RulesBook::from_exchange_info(&info);
    info!("loaded trading rules for {} symbols from {:?}.", book.len(), path);
    Ok(book)
}

fn run(cli: Cli, cfg: config::Config) -> Result<(), Box<dyn std::error::Error>> {
    let rules_path = cli.exchange_info.unwrap_or(cfg.exchange_info);
    match cli.command {
        Command::Quote {
            side,
            amount,
            price,
            leverage,
        } => match leverage {
            Some(l) => {
                let qty = sizing::leveraged_quantity(amount, l, price)?;
                println!("[{}] {} x{} @ {} sizes {}", side, amount, l, price, qty);
            }
            None => {
                let result = sizing::quantity_for_amount(amount, price, side)?;
                match side {
                    Side::Buy => println!("{} @ {} buys {}", amount, price, result),
                    Side::Sell => println!("selling {} @ {} gives {}", amount, price, result),
                }
            }
        },

        Command::Rules { symbol } => {
            let book = load_rules(&rules_path)?;
            let tr = book.get(&symbol)?;
            println!("symbol:        {}", tr.symbol());
            println!("base/quote:    {}/{}", tr.base_asset(), tr.quote_asset());
            println!("min quantity:  {}", tr.min_quantity());
            println!("quantity step: {}", tr.quantity_step());
            println!("price tick:    {}", utils::opt_decimal(tr.price_tick()));
            println!("min notional:  {}", utils::opt_decimal(tr.min_notional()));
        }

        Command::Normalize {
            symbol,
            side,
            quantity,
            price,
        } => {
            let book = load_rules(&rules_path)?;
            let tr = book.get(&symbol)?;
            let request = match price {
                Some(p) => OrderRequest::limit(side, quantity, p),
                None => OrderRequest::market(side, quantity),
            };
            let order = normalize_order(&request, tr)?;
            info!("[{}] {} normalized {:?}", side, tr.symbol(), order);
            println!(
                "{} {:?} {} quantity={} price={} notional={}",
                order.side,
                order.order_type(),
                tr.symbol(),
                order.quantity,
                utils::opt_decimal(order.price),
                utils::opt_decimal(order.notional)
            );
        }

        Command::MaxSell {
            symbol,
            free,
            balance,
        } => {
            let book = load_rules(&rules_path)?;
            let tr = book.get(&symbol)?;
            let amount = match (free, balance) {
                (_, Some(doc)) => {
                    let b = Balance::from_json(&doc)?;
                    info!(
                        "{} balance: free {} locked {} total {}",
                        b.asset,
                        b.free,
                        b.locked,
                        b.total()
                    );
                    sizing::max_sell_balance(&b, tr)?
                }
                (Some(f), None) => sizing::max_sell_amount(f, tr)?,
                (None, None) => return Err("either FREE or --balance is required".into()),
            };
            println!("{}", amount);
        }

        Command::Simulate {
            symbol,
            side,
            amount,
            maker,
            taker,
        } => {
            let book = load_rules(&rules_path)?;
            let tr = book.get(&symbol)?;
            let defaults = cfg.fees.as_ref();
            let rate = |given: Option<Decimal>, default: Option<Decimal>, name: &str| {
                given.or(default).ok_or_else(|| {
                    NormalizeError::InvalidRequest(format!(
                        "no {} fee given and no [Fees] section configured",
                        name
                    ))
                })
            };
            let fee = TradeFee::new(
                tr.symbol(),
                rate(maker, defaults.map(|f| f.maker), "maker")?,
                rate(taker, defaults.map(|f| f.taker), "taker")?,
            );
            let sim = sizing::simulate_trade(amount, side, tr, &fee)?;
            println!(
                "[{}] {} quantity={} fee={}",
                side,
                tr.symbol(),
                sim.trade_quantity,
                sim.fee
            );
        }
    }

    Ok(())
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let inifile = config::load(&cli.config)?;
    let cfg = config::from_ini(&inifile)?;
    let _logger = utils::init_logging(&cfg.logging.directory, &cfg.logging.level)?;

    info!("starting up...");
    config::dump(&inifile);
    info!("loaded configuration from {:?}.", cli.config);

    if let Err(e) = run(cli, cfg) {
        error!("{}", e);
        return Err(e);
    }

    Ok(())
}
