//! The workflow catalog: each entry is one user journey through the
//! asset-management UI, expressed as a named sequence of primitive actions.
//!
//! Failure escalation is decided per step, not per workflow. Steps the journey
//! cannot proceed without (navigation, form fills, submit clicks) escalate a
//! `false` primitive return into a workflow error; cosmetic steps (waits for
//! secondary content, scrolls, optional panel clicks) are advisory and the
//! workflow continues past them.

use anyhow::{bail, Result};
use futures::future::BoxFuture;

use crate::fixtures::TestFixtures;
use crate::runner::actions::Actions;
use crate::session::Selector;

type WorkflowBody =
    Box<dyn for<'a> Fn(&'a Actions<'a>, &'a TestFixtures) -> BoxFuture<'a, Result<()>> + Send + Sync>;

/// A named user journey executed against the shared browser session
pub struct Workflow {
    name: String,
    body: WorkflowBody,
}

impl Workflow {
    pub fn new<F>(name: &str, body: F) -> Self
    where
        F: for<'a> Fn(&'a Actions<'a>, &'a TestFixtures) -> BoxFuture<'a, Result<()>>
            + Send
            + Sync
            + 'static,
    {
        Self {
            name: name.to_string(),
            body: Box::new(body),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub async fn run(&self, actions: &Actions<'_>, fixtures: &TestFixtures) -> Result<()> {
        (self.body)(actions, fixtures).await
    }
}

/// The fixed catalog, in execution order
pub fn catalog() -> Vec<Workflow> {
    vec![
        login(),
        view_dashboard(),
        view_users(),
        manage_assets(),
        manage_software(),
        inventory_management(),
        view_reports(),
        borrowing_management(),
    ]
}

fn login() -> Workflow {
    Workflow::new("Login", |a, f| {
        Box::pin(async move {
            if !a.navigate("/login").await {
                bail!("Login page did not load");
            }
            if !a
                .fill(&Selector::css("#employee_id"), &f.user.employee_id, "Employee ID")
                .await
            {
                bail!("Employee ID field not found");
            }
            if !a
                .fill(&Selector::css("#password"), &f.user.password, "Password")
                .await
            {
                bail!("Password field not found");
            }
            if !a
                .click(&Selector::css("button[type=\"submit\"]"), "Login Button")
                .await
            {
                bail!("Login button not found");
            }
            // Redirect target varies with the user's role; missing dashboard
            // markup is advisory here
            a.wait_for(&Selector::css("[class*=\"dashboard\"]"), None).await;
            Ok(())
        })
    })
}

fn view_dashboard() -> Workflow {
    Workflow::new("View Dashboard", |a, _f| {
        Box::pin(async move {
            if !a.navigate("/dashboard").await {
                bail!("Dashboard page did not load");
            }
            a.wait_for(&Selector::css("[class*=\"dashboard\"]"), None).await;
            a.scroll_into_view(&Selector::css("body")).await;
            Ok(())
        })
    })
}

fn view_users() -> Workflow {
    Workflow::new("View Users", |a, _f| {
        Box::pin(async move {
            if !a.navigate("/users").await {
                bail!("Users page did not load");
            }
            a.wait_for(&Selector::xpath("//table | //*[@role=\"grid\"]"), None)
                .await;
            a.scroll_into_view(&Selector::css("body")).await;
            Ok(())
        })
    })
}

fn manage_assets() -> Workflow {
    Workflow::new("Manage Assets", |a, f| {
        Box::pin(async move {
            if !a.navigate("/assets").await {
                bail!("Assets page did not load");
            }
            if !a
                .click(
                    &Selector::xpath("//button[contains(., \"Add\") or contains(., \"เพิ่ม\")]"),
                    "Add Asset Button",
                )
                .await
            {
                bail!("Add Asset button not found");
            }
            if !a
                .fill(
                    &Selector::xpath(
                        "//input[contains(@placeholder, \"name\") or contains(@placeholder, \"Name\")]",
                    ),
                    &f.asset.name,
                    "Asset Name",
                )
                .await
            {
                bail!("Asset name field not found");
            }
            // Type dropdown may be preselected; skipping it still yields a
            // valid record
            a.click(&Selector::css("select, [role=\"combobox\"]"), "Asset Type Dropdown")
                .await;
            if !a
                .click(
                    &Selector::xpath("//button[@type=\"submit\" or contains(., \"Save\")]"),
                    "Save Button",
                )
                .await
            {
                bail!("Save button not found");
            }
            Ok(())
        })
    })
}

fn manage_software() -> Workflow {
    Workflow::new("Manage Software", |a, _f| {
        Box::pin(async move {
            if !a.navigate("/software").await {
                bail!("Software page did not load");
            }
            if !a
                .click(
                    &Selector::xpath("//button[contains(., \"Add\") or contains(., \"เพิ่ม\")]"),
                    "Add Software Button",
                )
                .await
            {
                bail!("Add Software button not found");
            }
            Ok(())
        })
    })
}

fn inventory_management() -> Workflow {
    Workflow::new("Inventory Management", |a, _f| {
        Box::pin(async move {
            if !a.navigate("/inventory").await {
                bail!("Inventory page did not load");
            }
            a.scroll_into_view(&Selector::css("body")).await;
            Ok(())
        })
    })
}

fn view_reports() -> Workflow {
    Workflow::new("View Reports", |a, _f| {
        Box::pin(async move {
            if !a.navigate("/reports").await {
                bail!("Reports page did not load");
            }
            a.wait_for(&Selector::xpath("//canvas | //*[@role=\"img\"]"), None)
                .await;
            a.scroll_into_view(&Selector::css("body")).await;
            Ok(())
        })
    })
}

fn borrowing_management() -> Workflow {
    Workflow::new("Borrowing Management", |a, _f| {
        Box::pin(async move {
            if !a.navigate("/borrowing").await {
                bail!("Borrowing page did not load");
            }
            if !a
                .click(
                    &Selector::xpath("//button[contains(., \"Add\") or contains(., \"เพิ่ม\")]"),
                    "Add Borrowing Button",
                )
                .await
            {
                bail!("Add Borrowing button not found");
            }
            Ok(())
        })
    })
}
