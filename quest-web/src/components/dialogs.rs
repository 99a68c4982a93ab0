use quest_game::certificate::{PROGRAM_NAME, QUEST_TITLE};
use quest_game::{CertificateData, ResetRequest};
use yew::prelude::*;

use super::modal::Modal;

#[derive(Properties, PartialEq, Clone)]
pub struct ResetProps {
    /// Pending reset awaiting confirmation; `None` keeps the dialog closed
    pub request: Option<ResetRequest>,
    pub on_confirm: Callback<()>,
    pub on_cancel: Callback<()>,
}

#[function_component(ResetDialog)]
pub fn reset_dialog(p: &ResetProps) -> Html {
    let confirm = {
        let cb = p.on_confirm.clone();
        Callback::from(move |_| cb.emit(()))
    };
    let cancel = {
        let cb = p.on_cancel.clone();
        Callback::from(move |_| cb.emit(()))
    };
    let (lines, summary) = p.request.as_ref().map_or_else(
        || (Vec::new(), String::new()),
        |req| {
            (
                req.consequences().to_vec(),
                format!(
                    "You will lose {} points, {} badges and {} completed steps.",
                    req.points_lost(),
                    req.badges_lost(),
                    req.steps_lost()
                ),
            )
        },
    );

    html! {
        <Modal
            open={p.request.is_some()}
            title="🔄 Reset your game progress?"
            description={AttrValue::from("This action cannot be undone!")}
            on_close={p.on_cancel.clone()}
        >
            <p>{"This will:"}</p>
            <ul class="reset-consequences">
                { for lines.into_iter().map(|line| html! { <li>{ line }</li> }) }
            </ul>
            <p class="reset-summary">{ summary }</p>
            <div class="modal__actions">
                <button type="button" class="btn btn-outline" onclick={cancel}>{"Cancel"}</button>
                <button type="button" id="confirmResetBtn" class="btn btn-danger" onclick={confirm}>{"Reset Progress"}</button>
            </div>
        </Modal>
    }
}

#[derive(Properties, PartialEq, Clone)]
pub struct CertificateProps {
    pub certificate: Option<CertificateData>,
    pub on_close: Callback<()>,
    pub on_download: Callback<()>,
    pub on_download_pdf: Callback<()>,
}

#[function_component(CertificateDialog)]
pub fn certificate_dialog(p: &CertificateProps) -> Html {
    let download = {
        let cb = p.on_download.clone();
        Callback::from(move |_| cb.emit(()))
    };
    let download_pdf = {
        let cb = p.on_download_pdf.clone();
        Callback::from(move |_| cb.emit(()))
    };
    let body = p.certificate.as_ref().map_or_else(Html::default, |cert| {
        html! {
            <div class="certificate">
                <h3 class="certificate__title">{"🏆 CERTIFICATE OF COMPLETION 🏆"}</h3>
                <p class="certificate__subtitle">{ QUEST_TITLE }</p>
                <p>{"This is to certify that"}</p>
                <p id="certificateName" class="certificate__name">{ cert.player_name.clone() }</p>
                <p>{ format!("has successfully completed the {QUEST_TITLE}") }</p>
                <ul class="certificate__skills">
                    { for cert.skills.iter().map(|skill| html! { <li>{ format!("✓ {skill}") }</li> }) }
                </ul>
                <p class="certificate__footer">
                    <span id="certificateDate">{ cert.date_label() }</span>
                    <span id="certificateScore">{ cert.score_label() }</span>
                </p>
                <p class="certificate__program">{ PROGRAM_NAME }</p>
            </div>
        }
    });

    html! {
        <Modal
            open={p.certificate.is_some()}
            title="🎓 Your Certificate"
            on_close={p.on_close.clone()}
        >
            { body }
            <div class="modal__actions">
                <button type="button" class="btn btn-primary" onclick={download_pdf}>{"📄 Download as PDF"}</button>
                <button type="button" class="btn btn-outline" onclick={download}>{"🖼️ Download as Image"}</button>
            </div>
        </Modal>
    }
}
