//! mirror command - Make a destination bucket match a source bucket
//!
//! Plans from two point-in-time listings, then executes copy actions before
//! delete actions through the gateway. Execution is not atomic: an
//! interrupted run leaves the destination partially updated, and re-running
//! the command computes exactly the remaining actions.

use clap::Args;
use obc_core::{plan, Action, ObjectStore as _, SyncPlan};
use serde::Serialize;

use super::{fail, Ctx};
use crate::exit_code::ExitCode;

/// Make a destination bucket match a source bucket
#[derive(Args, Debug)]
pub struct MirrorArgs {
    /// Source bucket
    pub source: String,

    /// Destination bucket
    pub dest: String,

    /// Delete destination objects that are absent from the source
    #[arg(long)]
    pub remove: bool,

    /// Print the plan without executing it
    #[arg(long)]
    pub dry_run: bool,
}

#[derive(Debug, Serialize)]
struct MirrorOutput {
    status: &'static str,
    source: String,
    dest: String,
    copied: usize,
    deleted: usize,
}

#[derive(Debug, Serialize)]
struct DryRunOutput {
    source: String,
    dest: String,
    #[serde(flatten)]
    plan: SyncPlan,
}

/// Execute the mirror command
pub async fn execute(args: MirrorArgs, ctx: &Ctx) -> ExitCode {
    let formatter = ctx.formatter();

    if args.source == args.dest {
        formatter.error("source and destination buckets are identical");
        return ExitCode::UserError;
    }

    let gateway = match ctx.gateway().await {
        Ok(g) => g,
        Err(e) => return fail(&formatter, &e),
    };

    let source = match gateway.list_objects(&args.source, None).await {
        Ok(l) => l,
        Err(e) => return fail(&formatter, &e),
    };

    let dest = match gateway.list_objects(&args.dest, None).await {
        Ok(l) => l,
        Err(e) => return fail(&formatter, &e),
    };

    let plan = plan(&source, &dest, args.remove);

    if plan.is_empty() {
        if formatter.is_json() {
            formatter.json(&MirrorOutput {
                status: "success",
                source: args.source.clone(),
                dest: args.dest.clone(),
                copied: 0,
                deleted: 0,
            });
        } else {
            formatter.println(&format!(
                "'{}' already matches '{}'; nothing to do.",
                args.dest, args.source
            ));
        }
        return ExitCode::Success;
    }

    if args.dry_run {
        if formatter.is_json() {
            formatter.json(&DryRunOutput {
                source: args.source.clone(),
                dest: args.dest.clone(),
                plan,
            });
        } else {
            for action in &plan.actions {
                formatter.println(&render_action(action, &args.source, &args.dest));
            }
            formatter.println(&format!(
                "\nWould copy {} and delete {} object(s).",
                plan.copies(),
                plan.deletes()
            ));
        }
        return ExitCode::Success;
    }

    let mut copied = 0;
    let mut deleted = 0;

    for action in &plan.actions {
        match action {
            Action::Copy(key) => {
                match gateway
                    .copy_object(&args.source, key, &args.dest, key)
                    .await
                {
                    Ok(_) => {
                        if !formatter.is_json() {
                            formatter.println(&format!(
                                "{}/{key} -> {}/{key}",
                                args.source, args.dest
                            ));
                        }
                        copied += 1;
                    }
                    Err(e) => return fail(&formatter, &e),
                }
            }
            Action::Delete(key) => match gateway.delete_object(&args.dest, key).await {
                Ok(()) => {
                    if !formatter.is_json() {
                        formatter.println(&format!("Removed: {}/{key}", args.dest));
                    }
                    deleted += 1;
                }
                Err(e) => return fail(&formatter, &e),
            },
        }
    }

    if formatter.is_json() {
        formatter.json(&MirrorOutput {
            status: "success",
            source: args.source.clone(),
            dest: args.dest.clone(),
            copied,
            deleted,
        });
    } else {
        formatter.success(&format!(
            "Mirrored '{}' to '{}': {copied} copied, {deleted} deleted.",
            args.source, args.dest
        ));
    }

    ExitCode::Success
}

fn render_action(action: &Action, source: &str, dest: &str) -> String {
    match action {
        Action::Copy(key) => format!("copy   {source}/{key} -> {dest}/{key}"),
        Action::Delete(key) => format!("delete {dest}/{key}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_action() {
        let copy = render_action(&Action::Copy("a.txt".into()), "src", "dst");
        assert_eq!(copy, "copy   src/a.txt -> dst/a.txt");

        let delete = render_action(&Action::Delete("b.txt".into()), "src", "dst");
        assert_eq!(delete, "delete dst/b.txt");
    }
}
