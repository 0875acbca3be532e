//! CLI tool for the payment form engine.
//!
//! # Usage
//!
//! ```bash
//! # Detect the network of a card number
//! cardform classify 4242424242424242
//!
//! # Format a card number in blocks of four
//! cardform format 1234123412341234
//!
//! # Mask a value with a placeholder
//! cardform mask 4 --length 2 --placeholder MM
//!
//! # Validate one field
//! cardform check expiry-month 13
//!
//! # Validate a whole form as on submit
//! cardform submit --card-number 5555555555554444 --card-holder "John Doe" \
//!     --expiry-month 12 --expiry-year 99 --cvv 123 --output json
//! ```

use card_form::mask::{mask_value, CardPreview};
use card_form::validate::{current_two_digit_year, message_for, validate_field_at};
use card_form::{classify, format, CardForm, Field, FormSession};
use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "cardform")]
#[command(author, version, about = "Payment card form validation tool")]
struct Cli {
    /// Output format
    #[arg(short, long, global = true, default_value = "text")]
    output: OutputFormat,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Detect the card network of a number
    Classify {
        /// Card number, digits only
        card_number: String,
    },

    /// Format a card number in blocks of four
    Format {
        /// Card number to format
        card_number: String,
    },

    /// Overlay a placeholder onto a value
    Mask {
        /// Value typed so far
        value: String,

        /// Target length
        #[arg(short, long, default_value = "16")]
        length: usize,

        /// Placeholder to fill with
        #[arg(short, long, default_value = "*")]
        placeholder: String,
    },

    /// Validate a single field value
    Check {
        /// Field name (cardNumber, cardHolder, expiryMonth, expiryYear, cvv)
        field: Field,

        /// Value to validate
        #[arg(default_value = "")]
        value: String,

        /// Two-digit year to compare expiry years against (default: today)
        #[arg(long)]
        current_year: Option<String>,
    },

    /// Validate the whole form as a submit attempt would
    Submit {
        #[command(flatten)]
        form: FormArgs,

        /// Two-digit year to compare expiry years against (default: today)
        #[arg(long)]
        current_year: Option<String>,
    },

    /// Show the card preview for a form
    Preview {
        #[command(flatten)]
        form: FormArgs,
    },
}

#[derive(clap::Args)]
struct FormArgs {
    /// Card number
    #[arg(long, default_value = "")]
    card_number: String,

    /// Name on card
    #[arg(long, default_value = "")]
    card_holder: String,

    /// Expiry month (MM)
    #[arg(long, default_value = "")]
    expiry_month: String,

    /// Expiry year (YY)
    #[arg(long, default_value = "")]
    expiry_year: String,

    /// Security code
    #[arg(long, default_value = "")]
    cvv: String,
}

impl FormArgs {
    fn into_form(self) -> CardForm {
        CardForm::new()
            .with(Field::CardNumber, self.card_number)
            .with(Field::CardHolder, self.card_holder)
            .with(Field::ExpiryMonth, self.expiry_month)
            .with(Field::ExpiryYear, self.expiry_year)
            .with(Field::Cvv, self.cvv)
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "warn".into()))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let output = cli.output;

    match cli.command {
        Commands::Classify { card_number } => cmd_classify(&card_number, output),
        Commands::Format { card_number } => cmd_format(&card_number),
        Commands::Mask {
            value,
            length,
            placeholder,
        } => cmd_mask(&value, length, &placeholder),
        Commands::Check {
            field,
            value,
            current_year,
        } => cmd_check(field, value, current_year, output),
        Commands::Submit { form, current_year } => {
            cmd_submit(form.into_form(), current_year, output)
        }
        Commands::Preview { form } => cmd_preview(&form.into_form(), output),
    }
}

fn cmd_classify(card_number: &str, output: OutputFormat) {
    let network = classify(card_number);
    match output {
        OutputFormat::Text => {
            println!("Network: {}", network.name());
            if network.is_known() {
                println!("Valid Lengths: {:?}", network.valid_lengths());
                println!("Security Code Length: {}", network.cvv_length());
            }
        }
        OutputFormat::Json => print_json(&serde_json::json!({
            "network": network,
            "validLengths": network.valid_lengths(),
            "cvvLength": network.cvv_length(),
        })),
    }
    if !network.is_known() {
        std::process::exit(1);
    }
}

fn cmd_format(card_number: &str) {
    println!("{}", format::format_card_number(card_number));
}

fn cmd_mask(value: &str, length: usize, placeholder: &str) {
    println!("{}", mask_value(value, length, placeholder));
}

fn cmd_check(field: Field, value: String, current_year: Option<String>, output: OutputFormat) {
    let form = CardForm::new().with(field, value);
    let year = current_year.unwrap_or_else(current_two_digit_year);
    let result = validate_field_at(field, &form, &year);

    match output {
        OutputFormat::Text => match result {
            Ok(()) => println!("Valid: yes"),
            Err(e) => {
                println!("Valid: no");
                println!("Error: {}", e);
            }
        },
        OutputFormat::Json => print_json(&serde_json::json!({
            "field": field,
            "valid": result.is_ok(),
            "message": message_for(result),
        })),
    }

    if result.is_err() {
        std::process::exit(1);
    }
}

fn cmd_submit(form: CardForm, current_year: Option<String>, output: OutputFormat) {
    let mut session = match current_year {
        Some(year) => FormSession::with_current_year(year),
        None => FormSession::new(),
    };
    let outcome = session.submit(&form);

    match output {
        OutputFormat::Text => {
            println!("Valid: {}", if outcome.is_valid { "yes" } else { "no" });
            for (field, state) in outcome.errors.iter() {
                if let Some(error) = state.error() {
                    println!("{}: {}", field.label(), error);
                }
            }
        }
        OutputFormat::Json => print_json(&outcome),
    }

    if !outcome.is_valid {
        std::process::exit(1);
    }
}

fn cmd_preview(form: &CardForm, output: OutputFormat) {
    let preview = CardPreview::of(form);
    match output {
        OutputFormat::Text => {
            println!("Network: {}", preview.network.name());
            println!("Number: {}", preview.number);
            println!("Holder: {}", preview.holder);
            println!("Expires: {}", preview.expiry);
            println!("Security Code: {}", preview.cvv);
        }
        OutputFormat::Json => print_json(&preview),
    }
}

fn print_json<T: serde::Serialize>(value: &T) {
    match serde_json::to_string_pretty(value) {
        Ok(json) => println!("{}", json),
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(2);
        }
    }
}
