//! Command implementations over a loaded session.

use std::fs;
use std::io::{self, Write as _};
use std::path::{Path, PathBuf};

use anyhow::{Context as _, Result, anyhow};

use mailroster_core::{
    Attachment, Error, GroupId, ImportReport, ImportTarget, Notice, Session, SnapshotStatus,
};
use mailroster_remote::RemoteClient;

type CliSession = Session<RemoteClient>;

/// Connects to the service and performs the startup load.
pub async fn connect(base_url: &str) -> Result<CliSession> {
    let mut session = Session::new(RemoteClient::new(base_url));
    session.load().await.map_err(|error| user_error(&error))?;
    Ok(session)
}

fn user_error(error: &Error) -> anyhow::Error {
    anyhow!("{}", Notice::from_error(error).message)
}

/// The local mutation already applied; a failed save only warrants a
/// warning, not a failure exit.
fn report_snapshot(status: &SnapshotStatus) {
    if let SnapshotStatus::Failed(error) = status {
        eprintln!("warning: change applied locally, but saving to the server failed: {error}");
    }
}

fn report_import(report: &ImportReport) {
    println!(
        "imported {} addresses ({} new)",
        report.extracted, report.added
    );
    report_snapshot(&report.snapshot);
}

fn file_name(path: &Path) -> &str {
    path.file_name()
        .and_then(|name| name.to_str())
        .unwrap_or("upload.csv")
}

pub async fn email_add(session: &mut CliSession, address: &str) -> Result<()> {
    let status = session
        .add_email(address)
        .await
        .map_err(|error| user_error(&error))?;
    report_snapshot(&status);
    println!("added {address}");
    Ok(())
}

pub async fn email_remove(session: &mut CliSession, address: &str) {
    let status = session.remove_email(address).await;
    report_snapshot(&status);
    println!("removed {address}");
}

pub fn email_list(session: &CliSession) {
    for email in session.roster().emails() {
        println!("{email}");
    }
}

pub async fn group_create(
    session: &mut CliSession,
    name: &str,
    members: Vec<String>,
    from_file: Option<PathBuf>,
) -> Result<()> {
    session.begin_group();
    session.group_draft_mut().name = name.to_string();
    for member in members {
        session.group_draft_mut().members.insert(member);
    }

    if let Some(path) = from_file {
        let bytes =
            fs::read(&path).with_context(|| format!("cannot read {}", path.display()))?;
        let report = session
            .import_file(ImportTarget::GroupEditor, file_name(&path), bytes)
            .await
            .map_err(|error| user_error(&error))?;
        report_import(&report);
    }

    let (id, status) = session
        .save_group_draft()
        .await
        .map_err(|error| user_error(&error))?;
    report_snapshot(&status);
    println!("created group {id}");
    Ok(())
}

pub async fn group_update(
    session: &mut CliSession,
    id: &str,
    name: Option<String>,
    members: Vec<String>,
) -> Result<()> {
    let id = GroupId::new(id);
    let current = session
        .roster()
        .group(&id)
        .ok_or_else(|| anyhow!("group not found: {id}"))?;

    let name = name.unwrap_or_else(|| current.name.clone());
    let members = if members.is_empty() {
        current.emails.clone()
    } else {
        members
    };

    let status = session
        .update_group(&id, &name, members)
        .await
        .map_err(|error| user_error(&error))?;
    report_snapshot(&status);
    println!("updated group {id}");
    Ok(())
}

pub async fn group_delete(session: &mut CliSession, id: &str) {
    let status = session.delete_group(&GroupId::new(id)).await;
    report_snapshot(&status);
    println!("deleted group {id}");
}

pub fn group_list(session: &CliSession) {
    for group in session.roster().groups() {
        println!(
            "{}  {} ({} members)",
            group.id,
            group.name,
            group.emails.len()
        );
    }
}

pub fn group_show(session: &CliSession, id: &str) -> Result<()> {
    let id = GroupId::new(id);
    let group = session
        .roster()
        .group(&id)
        .ok_or_else(|| anyhow!("group not found: {id}"))?;
    println!("{} ({} members)", group.name, group.emails.len());
    for email in &group.emails {
        println!("  {email}");
    }
    Ok(())
}

/// Local-only export: no remote round-trip is involved.
pub fn group_export(session: &CliSession, id: &str, output: Option<PathBuf>) -> Result<()> {
    let id = GroupId::new(id);
    let group = session
        .roster()
        .group(&id)
        .ok_or_else(|| anyhow!("group not found: {id}"))?;

    let path = output.unwrap_or_else(|| PathBuf::from(group.export_file_name()));
    fs::write(&path, group.export_listing())
        .with_context(|| format!("cannot write {}", path.display()))?;
    println!(
        "exported {} addresses to {}",
        group.emails.len(),
        path.display()
    );
    Ok(())
}

pub async fn import(session: &mut CliSession, file: &Path) -> Result<()> {
    let bytes = fs::read(file).with_context(|| format!("cannot read {}", file.display()))?;
    let report = session
        .import_file(ImportTarget::AddressBook, file_name(file), bytes)
        .await
        .map_err(|error| user_error(&error))?;
    report_import(&report);
    Ok(())
}

pub async fn send(
    session: &mut CliSession,
    subject: String,
    content: String,
    to: Vec<String>,
    groups: Vec<String>,
    attachments: Vec<PathBuf>,
    import_file: Option<PathBuf>,
) -> Result<()> {
    {
        let draft = session.send_draft_mut();
        draft.subject = subject;
        draft.content = content;
        for address in to {
            draft.emails.insert(address);
        }
        for group in groups {
            draft.groups.insert(group);
        }
    }
    for path in attachments {
        let bytes =
            fs::read(&path).with_context(|| format!("cannot read {}", path.display()))?;
        session
            .send_draft_mut()
            .attachments
            .push(Attachment::new(file_name(&path), bytes));
    }

    if let Some(path) = import_file {
        let bytes =
            fs::read(&path).with_context(|| format!("cannot read {}", path.display()))?;
        let report = session
            .import_file(ImportTarget::SendPicker, file_name(&path), bytes)
            .await
            .map_err(|error| user_error(&error))?;
        report_import(&report);
    }

    let resolved = session.resolved_recipients();
    println!("{} recipients resolved", resolved.len());

    let report = session.send().await.map_err(|error| user_error(&error))?;
    println!("sent {} messages", report.sent);
    Ok(())
}

pub async fn clear(session: &mut CliSession, yes: bool) -> Result<()> {
    if !yes {
        print!("Clear all addresses and groups, locally and on the server? [y/N] ");
        io::stdout().flush()?;
        let mut answer = String::new();
        io::stdin().read_line(&mut answer)?;
        if !matches!(answer.trim(), "y" | "Y" | "yes") {
            println!("aborted");
            return Ok(());
        }
    }

    session
        .clear_all()
        .await
        .map_err(|error| user_error(&error))?;
    println!("all data cleared");
    Ok(())
}

pub fn status(session: &CliSession) {
    println!("{} addresses", session.roster().emails().len());
    println!("{} groups", session.roster().groups().len());
}
