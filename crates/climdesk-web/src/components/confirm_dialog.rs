//! Approve/reject confirmation form

use super::source_href;
use climdesk_core::{Decision, Request};
use maud::{Markup, html};

/// POST form confirming `decision` on `request`
///
/// The remarks field is required when rejecting. `return_params` is the
/// dashboard query string carried through the decision and the Cancel link.
#[must_use]
pub fn confirm_dialog(
    request: &Request,
    decision: Decision,
    error: Option<&str>,
    remarks: &str,
    return_params: &str,
) -> Markup {
    let base = source_href(request.source);
    let (title, button) = match decision {
        Decision::Approve => ("Approve request", "Confirm approval"),
        Decision::Reject => ("Reject request", "Confirm rejection"),
    };
    let required = decision == Decision::Reject;
    html! {
        div class="overlay" {
            div class="modal" role="dialog" aria-labelledby="confirm-title" {
                h2 id="confirm-title" { (title) " #" (request.id) }
                p { "Submitted by " strong { (request.name) } " (" (request.organization) ")" }
                @if let Some(error) = error {
                    div class="notice error" role="alert" { (error) }
                }
                form method="post" action={ (base) "/" (request.id) "/decision" (return_params) } {
                    input type="hidden" name="action" value=(decision.as_str());
                    label for="remarks" {
                        @if required { "Reason for rejection (required)" } @else { "Remarks (optional)" }
                    }
                    textarea id="remarks" name="remarks" required[required] { (remarks) }
                    p {
                        button type="submit" { (button) }
                        " "
                        a href={ (base) (return_params) } { "Cancel" }
                    }
                }
            }
        }
    }
}
