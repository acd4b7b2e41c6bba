//! Command-line interface of the `clientele` binary.

use clap::{Args, Parser, Subcommand};

use crate::api::CustomerApi;
use crate::form::FormField;
use crate::list::CustomerListView;

/// clientele - manage customers from the terminal
#[derive(Debug, Parser)]
#[command(name = "clientele")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Base URL of the customer API (overrides CLIENTELE_API_URL)
    #[arg(long, global = true, value_name = "URL")]
    pub api_url: Option<String>,

    /// Increase verbosity (-v for info, -vv for debug)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// List all customers
    List,

    /// Show one customer
    Show {
        /// Customer id
        id: String,
    },

    /// Add a customer
    Add(CustomerArgs),

    /// Edit a customer; omitted fields keep their current value
    Edit {
        /// Customer id
        id: String,
        #[command(flatten)]
        fields: CustomerArgs,
    },

    /// Delete a customer
    Delete {
        /// Customer id
        id: String,
        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
}

/// Form fields given on the command line.
#[derive(Debug, Default, Args)]
pub struct CustomerArgs {
    #[arg(long)]
    pub name: Option<String>,

    /// Date of birth as YYYY-MM-DD
    #[arg(long, value_name = "DATE")]
    pub date_of_birth: Option<String>,

    #[arg(long, value_name = "NUMBER")]
    pub member_number: Option<String>,

    #[arg(long)]
    pub interests: Option<String>,
}

impl CustomerArgs {
    pub fn value(&self, field: FormField) -> Option<&str> {
        match field {
            FormField::Name => self.name.as_deref(),
            FormField::DateOfBirth => self.date_of_birth.as_deref(),
            FormField::MemberNumber => self.member_number.as_deref(),
            FormField::Interests => self.interests.as_deref(),
        }
    }

    /// Overwrite the given fields of the view's open form.
    pub fn apply_to<A: CustomerApi>(&self, view: &mut CustomerListView<A>) {
        for field in FormField::ALL {
            if let Some(value) = self.value(field) {
                view.set_field(field, value);
            }
        }
    }
}

impl Cli {
    /// Log filter for the chosen verbosity.
    #[must_use]
    pub fn log_filter(&self) -> &'static str {
        match self.verbose {
            0 => "clientele=warn",
            1 => "clientele=info",
            _ => "clientele=debug",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::HttpCustomerApi;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn delete_takes_yes_flag() {
        let cli = Cli::parse_from(["clientele", "delete", "abc", "--yes"]);
        assert!(matches!(cli.command, Command::Delete { ref id, yes: true } if id == "abc"));
    }

    #[test]
    fn edit_applies_only_given_fields() {
        let cli = Cli::parse_from(["clientele", "-v", "edit", "abc", "--interests", "chess"]);
        let Command::Edit { fields, .. } = cli.command else {
            panic!("expected edit");
        };
        let mut view = CustomerListView::new(HttpCustomerApi::new("http://localhost:3000/api"));
        view.open_create();
        view.set_field(FormField::Name, "Jane Doe");
        view.set_field(FormField::Interests, "reading");

        fields.apply_to(&mut view);
        let form = view.form().expect("form stays open");
        assert_eq!(form.name, "Jane Doe");
        assert_eq!(form.interests, "chess");
        assert_eq!(cli.verbose, 1);
    }

    #[test]
    fn fields_without_open_form_are_ignored() {
        let cli = Cli::parse_from(["clientele", "add", "--name", "Jane Doe"]);
        let Command::Add(fields) = cli.command else {
            panic!("expected add");
        };
        let mut view = CustomerListView::new(HttpCustomerApi::new("http://localhost:3000/api"));
        fields.apply_to(&mut view);
        assert!(view.form().is_none());
    }
}
