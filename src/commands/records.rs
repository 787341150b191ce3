//! List/add/remove commands for the category files.

use anyhow::{Context, Result};
use serde::Serialize;

use super::Session;
use crate::cli::{InterfaceAction, PolicyAction, RuleAction, SnatAction, ZoneAction};
use crate::records::{encode_line, Interface, Policy, Record, Rule, Snat, Zone};

/// Print records one per line, or as a JSON array.
fn print_records<R: Record + Serialize>(records: &[R], json: bool) -> Result<()> {
    if json {
        let output = serde_json::to_string_pretty(records).context("Failed to serialize records")?;
        println!("{}", output);
    } else {
        for record in records {
            println!("{}", encode_line(record));
        }
    }
    Ok(())
}

fn added<R: Record>(record: &R) {
    println!("[OK] Added {}", record.describe());
    println!("     Run 'shorewall-tenant reload' to apply changes");
}

fn removed(what: &str) {
    println!("[OK] Removed {}", what);
    println!("     Run 'shorewall-tenant reload' to apply changes");
}

pub fn zones(session: &Session, action: &ZoneAction) -> Result<()> {
    let files = session.files();
    match action {
        ZoneAction::List { json } => print_records(&files.zones()?, *json),
        ZoneAction::Add(args) => {
            let zone = Zone::from(args);
            files.add_zone(&zone)?;
            added(&zone);
            Ok(())
        }
        ZoneAction::Remove(key) => {
            files.remove_zone(&key.name)?;
            removed(&format!("zone '{}'", key.name));
            Ok(())
        }
    }
}

pub fn interfaces(session: &Session, action: &InterfaceAction) -> Result<()> {
    let files = session.files();
    match action {
        InterfaceAction::List { json } => print_records(&files.interfaces()?, *json),
        InterfaceAction::Add(args) => {
            let iface = Interface::from(args);
            files.add_interface(&iface)?;
            added(&iface);
            Ok(())
        }
        InterfaceAction::Remove(key) => {
            match &key.name {
                Some(name) => {
                    let iface = Interface::new(&key.zone, name);
                    files.remove_interface(&iface)?;
                    removed(&iface.describe());
                }
                None => {
                    files.remove_interface_by_zone(&key.zone)?;
                    removed(&format!("interface in zone '{}'", key.zone));
                }
            }
            Ok(())
        }
    }
}

pub fn policies(session: &Session, action: &PolicyAction) -> Result<()> {
    let files = session.files();
    match action {
        PolicyAction::List { json } => print_records(&files.policies()?, *json),
        PolicyAction::Add(args) => {
            let policy = Policy::from(args);
            files.add_policy(&policy)?;
            added(&policy);
            Ok(())
        }
        PolicyAction::Remove(args) => {
            let policy = Policy::from(args);
            files.remove_policy(&policy)?;
            removed(&policy.describe());
            Ok(())
        }
    }
}

pub fn rules(session: &Session, action: &RuleAction) -> Result<()> {
    let files = session.files();
    match action {
        RuleAction::List { json } => print_records(&files.rules()?, *json),
        RuleAction::Add(args) => {
            let rule = Rule::from(args);
            files.add_rule(&rule)?;
            added(&rule);
            Ok(())
        }
        RuleAction::Remove(args) => {
            let rule = Rule::from(args);
            files.remove_rule(&rule)?;
            removed(&rule.describe());
            Ok(())
        }
    }
}

pub fn snats(session: &Session, action: &SnatAction) -> Result<()> {
    let files = session.files();
    match action {
        SnatAction::List { json } => print_records(&files.snats()?, *json),
        SnatAction::Add(args) => {
            let snat = Snat::from(args);
            files.add_snat(&snat)?;
            added(&snat);
            Ok(())
        }
        SnatAction::Remove(args) => {
            let snat = Snat::from(args);
            files.remove_snat(&snat)?;
            removed(&snat.describe());
            Ok(())
        }
    }
}
