use std::cell::RefCell;

use log::{debug, info, warn};
use rand::Rng;

use super::config::WheelSettings;
use super::geometry::{random_target_rotation, SpinAnimation};
use super::links::AuthLinks;
use super::milestones::{
    milestone_legend, AchievedMilestone, MilestoneBar, MilestoneDefinition, MilestoneLegendEntry,
    MilestoneProgress,
};
use super::response::{classify_reply, HttpReply, SpinOutcome, SpinResponse};
use super::segments::Segment;
use super::view::{CouponView, ResultView, WheelView};
use crate::error::WheelError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpinPhase {
    Idle,
    Spinning,
}

/// Everything the transport needs to perform one spin.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpinRequest {
    pub url: String,
    pub csrf_token: String,
}

/// Performs the `POST` to the spin endpoint.
#[allow(async_fn_in_trait)]
pub trait SpinTransport {
    async fn post_spin(&self, request: &SpinRequest) -> Result<HttpReply, WheelError>;
}

#[derive(Debug, Clone, PartialEq)]
pub enum SpinStep {
    /// The server picked a prize; animate, then call [`SpinWheel::finish_spin`].
    Animate(SpinAnimation),
    /// The attempt ended without a prize; the view already shows why.
    Settled,
}

/// One wheel instance: segments, milestone mirror, spin phase and view state.
#[derive(Debug, Clone)]
pub struct SpinWheel {
    settings: WheelSettings,
    progress: MilestoneProgress,
    achieved: Vec<AchievedMilestone>,
    phase: SpinPhase,
    button_disabled: bool,
    result: ResultView,
    coupon: CouponView,
    pending: Option<(String, SpinResponse)>,
}

impl SpinWheel {
    pub fn new(settings: WheelSettings) -> Self {
        Self {
            progress: settings.progress.clone(),
            achieved: settings.achieved.clone(),
            settings,
            phase: SpinPhase::Idle,
            button_disabled: false,
            result: ResultView::Empty,
            coupon: CouponView::default(),
            pending: None,
        }
    }

    pub fn segments(&self) -> &[Segment] {
        &self.settings.segments
    }

    pub fn milestones(&self) -> &[MilestoneDefinition] {
        &self.settings.milestones
    }

    pub fn progress(&self) -> &MilestoneProgress {
        &self.progress
    }

    pub fn is_spinning(&self) -> bool {
        self.phase == SpinPhase::Spinning
    }

    pub fn milestone_bar(&self) -> MilestoneBar {
        MilestoneBar::compute(self.progress.spins, &self.settings.thresholds())
    }

    pub fn milestone_legend(&self) -> Vec<MilestoneLegendEntry> {
        milestone_legend(&self.settings.milestones, &self.progress, &self.achieved)
    }

    pub fn view(&self) -> WheelView {
        WheelView {
            result: self.result.clone(),
            coupon: self.coupon.clone(),
            button_disabled: self.button_disabled,
            spinning: self.is_spinning(),
        }
    }

    /// Whether the hub may be clicked: a spin could start right now.
    pub fn can_spin(&self) -> bool {
        self.settings.has_button
            && self.settings.spin_url.is_some()
            && self.settings.can_spin
            && !self.button_disabled
            && self.phase == SpinPhase::Idle
    }

    /// Whether the spin button should be wired at all.
    pub fn spin_enabled(&self) -> bool {
        self.settings.spin_url.is_some() && self.settings.can_spin
    }

    /// `cookies` is the page's cookie string at the moment of the click.
    pub fn begin_spin(&mut self, cookies: &str) -> Option<SpinRequest> {
        if !self.can_spin() {
            debug!("Ignoring spin trigger in phase {:?}", self.phase);
            return None;
        }
        let url = self.settings.spin_url.clone()?;

        self.button_disabled = true;
        self.phase = SpinPhase::Spinning;
        self.result = ResultView::Empty;
        self.coupon = CouponView::default();

        Some(SpinRequest {
            url,
            csrf_token: self.settings.csrf_token(cookies),
        })
    }

    pub fn receive<R: Rng + ?Sized>(
        &mut self,
        reply: Result<HttpReply, WheelError>,
        rng: &mut R,
    ) -> SpinStep {
        if self.phase != SpinPhase::Spinning {
            warn!("Spin reply arrived with no spin in flight");
            return SpinStep::Settled;
        }

        match classify_reply(reply) {
            SpinOutcome::Won { label, response } => {
                let segments = &self.settings.segments;
                let index = match segments.iter().position(|s| s.label == label) {
                    Some(index) => index,
                    None => {
                        warn!("Prize `{}` is not on the wheel; stopping on the first segment", label);
                        0
                    }
                };
                let target = random_target_rotation(index, segments.len(), rng);
                debug!("Spinning to segment {} ({})", index, label);
                self.pending = Some((label, response));
                SpinStep::Animate(SpinAnimation::new(target))
            }
            SpinOutcome::AuthRequired { login_url, message } => {
                let links = AuthLinks::build(
                    login_url.as_deref(),
                    self.settings.sign_in_url.as_deref(),
                    self.settings.sign_up_url.as_deref(),
                    &self.settings.page,
                );
                self.result = ResultView::AuthPrompt { message, links };
                self.settle();
                SpinStep::Settled
            }
            SpinOutcome::Failed { message } => {
                self.result = ResultView::Failure(message);
                self.settle();
                SpinStep::Settled
            }
        }
    }

    /// Shows the prize once the wheel has stopped and mirrors the server's spin count.
    pub fn finish_spin(&mut self) {
        let Some((label, response)) = self.pending.take() else {
            self.settle();
            return;
        };

        self.result = ResultView::Prize(label);
        self.coupon = CouponView::from_response(&response);

        let crossed = response.milestone.as_ref().and_then(|m| m.threshold_spins);
        self.progress.record_spin(crossed);
        if let (Some(threshold), Some(milestone)) = (crossed, response.milestone.as_ref()) {
            if !self.achieved.iter().any(|d| d.threshold_spins == threshold) {
                self.achieved.push(AchievedMilestone {
                    threshold_spins: threshold,
                    prize_type: milestone.prize_type,
                    discount_percent: milestone.discount_percent,
                    coupon_code: milestone.coupon_code.clone(),
                    label: milestone.label.clone(),
                });
            }
        }

        info!("Spin finished after {} total spins", self.progress.spins);
        self.settle();
    }

    // One spin per eligibility window: the button stays disabled on every path.
    fn settle(&mut self) {
        self.phase = SpinPhase::Idle;
        self.button_disabled = true;
    }
}

/// Sends a request obtained from [`SpinWheel::begin_spin`] and applies the reply.
/// The wheel is only borrowed after the await, so triggers arriving while the
/// request is in flight see `Spinning` and are ignored.
pub async fn run_spin<T, R>(
    wheel: &RefCell<SpinWheel>,
    transport: &T,
    request: SpinRequest,
    rng: &mut R,
) -> Option<SpinAnimation>
where
    T: SpinTransport,
    R: Rng + ?Sized,
{
    let reply = transport.post_spin(&request).await;
    match wheel.borrow_mut().receive(reply, rng) {
        SpinStep::Animate(animation) => Some(animation),
        SpinStep::Settled => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::spin_wheel::config::WheelConfig;
    use crate::spin_wheel::geometry::{angle_distance, slice_angle, wedges, POINTER_ANGLE};
    use crate::spin_wheel::links::PageLocation;
    use crate::spin_wheel::view::PrizeNote;
    use futures::executor::block_on;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::cell::Cell;

    struct FakeTransport {
        reply: Result<HttpReply, String>,
        calls: Cell<usize>,
    }

    impl FakeTransport {
        fn replying(status: u16, body: &str) -> Self {
            Self {
                reply: Ok(HttpReply::new(status, body)),
                calls: Cell::new(0),
            }
        }

        fn offline() -> Self {
            Self {
                reply: Err("Failed to fetch".to_string()),
                calls: Cell::new(0),
            }
        }
    }

    impl SpinTransport for FakeTransport {
        async fn post_spin(&self, request: &SpinRequest) -> Result<HttpReply, WheelError> {
            assert_eq!(request.url, "/spin/");
            assert_eq!(request.csrf_token, "tok");
            self.calls.set(self.calls.get() + 1);
            self.reply.clone().map_err(WheelError::Network)
        }
    }

    fn wheel_with(config: &str) -> SpinWheel {
        let config = WheelConfig::from_json(config).unwrap();
        let page = PageLocation {
            href: "https://shop.example/spin/".to_string(),
            pathname: "/spin/".to_string(),
        };
        SpinWheel::new(WheelSettings::from_config(&config, page))
    }

    const COOKIES: &str = "sessionid=s1; csrftoken=tok";

    fn default_wheel() -> SpinWheel {
        wheel_with(r#"{"btnId": "spin-btn", "spinUrl": "/spin/", "milestonesJson": [1, 3]}"#)
    }

    fn rng() -> StdRng {
        StdRng::seed_from_u64(42)
    }

    fn spin(wheel: &RefCell<SpinWheel>, transport: &FakeTransport) -> Option<SpinAnimation> {
        let request = wheel.borrow_mut().begin_spin(COOKIES)?;
        block_on(run_spin(wheel, transport, request, &mut rng()))
    }

    #[test]
    fn test_five_segment_win_end_to_end() {
        let wheel = RefCell::new(default_wheel());
        assert_eq!(wheel.borrow().segments().len(), 5);
        let transport = FakeTransport::replying(200, r#"{"success": true, "label": "Отстъпка 5%"}"#);

        let animation = spin(&wheel, &transport).expect("animation");
        {
            let view = wheel.borrow().view();
            assert!(view.spinning);
            assert!(view.button_disabled);
            assert_eq!(view.result, ResultView::Empty);
        }

        // The segment at index 2 must stop under the pointer.
        let landed = wedges(5, animation.angle_at(animation.duration_ms))[2].mid();
        assert!(angle_distance(landed, POINTER_ANGLE).abs() <= slice_angle(5) / 2.0);

        wheel.borrow_mut().finish_spin();
        let view = wheel.borrow().view();
        assert_eq!(view.result.text(), "Отстъпка 5%");
        assert!(view.button_disabled);
        assert!(!view.spinning);
        assert_eq!(wheel.borrow().progress().spins, 1);
        assert_eq!(transport.calls.get(), 1);
    }

    #[test]
    fn test_second_trigger_while_spinning_is_noop() {
        let mut wheel = default_wheel();
        assert!(wheel.begin_spin(COOKIES).is_some());
        assert!(wheel.is_spinning());
        assert!(wheel.begin_spin(COOKIES).is_none());
        assert!(!wheel.can_spin());
    }

    #[test]
    fn test_csrf_cookie_read_when_spin_starts() {
        let mut wheel = default_wheel();
        // The cookie rotated after the widget was built.
        let request = wheel.begin_spin("sessionid=s1; csrftoken=rotated").expect("spin");
        assert_eq!(request.csrf_token, "rotated");

        let mut configured = wheel_with(r#"{"btnId": "b", "spinUrl": "/spin/", "csrfToken": "page"}"#);
        let request = configured.begin_spin("csrftoken=rotated").expect("spin");
        assert_eq!(request.csrf_token, "page");
    }

    #[test]
    fn test_trigger_during_request_is_ignored() {
        let wheel = RefCell::new(default_wheel());
        let request = wheel.borrow_mut().begin_spin(COOKIES).expect("first trigger");

        // A second click before the reply lands.
        let transport = FakeTransport::replying(200, r#"{"success": true, "label": "Mystery Box"}"#);
        assert!(spin(&wheel, &transport).is_none());
        assert_eq!(transport.calls.get(), 0);
        assert!(wheel.borrow().is_spinning());

        assert!(block_on(run_spin(&wheel, &transport, request, &mut rng())).is_some());
        assert_eq!(transport.calls.get(), 1);
    }

    #[test]
    fn test_unauthorized_renders_link_pair() {
        let wheel = RefCell::new(wheel_with(
            r#"{"btnId": "b", "spinUrl": "/spin/", "signUpUrl": "/register/"}"#,
        ));
        let transport = FakeTransport::replying(401, r#"{"login_url": "/login/"}"#);

        assert!(spin(&wheel, &transport).is_none());
        let view = wheel.borrow().view();
        match view.result {
            ResultView::AuthPrompt { links, .. } => {
                assert_eq!(links.sign_in, "/login/");
                assert_eq!(links.sign_up, "/register/?next=%2Fspin%2F");
            }
            other => panic!("expected an auth prompt, got {:?}", other),
        }
        assert!(!view.spinning);
        assert!(view.button_disabled);
    }

    #[test]
    fn test_transport_failure_shows_retry_and_keeps_button_disabled() {
        let wheel = RefCell::new(default_wheel());
        let transport = FakeTransport::offline();

        assert!(spin(&wheel, &transport).is_none());
        let view = wheel.borrow().view();
        assert_eq!(view.result, ResultView::Failure("Опитай отново утре.".to_string()));
        assert!(!view.spinning);
        assert!(view.button_disabled);
        assert!(!wheel.borrow().can_spin());
    }

    #[test]
    fn test_malformed_prizes_fall_back_and_still_spin() {
        let wheel = RefCell::new(wheel_with(
            r#"{"btnId": "b", "spinUrl": "/spin/", "prizesJson": "[{oops"}"#,
        ));
        assert_eq!(wheel.borrow().segments().len(), 5);
        let transport = FakeTransport::replying(200, r#"{"success": true, "label": "Безплатна доставка", "prize_type": "free_shipping"}"#);
        assert!(spin(&wheel, &transport).is_some());
        wheel.borrow_mut().finish_spin();
        assert_eq!(wheel.borrow().view().coupon.prize, Some(PrizeNote::FreeShipping));
    }

    #[test]
    fn test_milestone_crossing_updates_progress() {
        let wheel = RefCell::new(wheel_with(
            r#"{"btnId": "b", "spinUrl": "/spin/", "milestonesJson": [{"threshold_spins": 3, "label": "Бонус"}], "milestoneProgressJson": {"spins": 2, "achieved": []}}"#,
        ));
        assert_eq!(wheel.borrow().milestone_bar().percent, 67);

        let body = r#"{"success": true, "label": "Mystery Box", "milestone": {"threshold_spins": 3, "prize_type": "discount_percent", "discount_percent": 10, "coupon_code": "MS3"}}"#;
        let transport = FakeTransport::replying(200, body);
        assert!(spin(&wheel, &transport).is_some());
        wheel.borrow_mut().finish_spin();

        let wheel = wheel.borrow();
        assert_eq!(wheel.progress().spins, 3);
        assert!(wheel.progress().achieved.contains(&3));
        // Sitting exactly on the last threshold leaves the bar empty.
        assert_eq!(wheel.milestone_bar().percent, 0);
        assert_eq!(wheel.milestone_bar().label(), "3 / 3");
        let legend = wheel.milestone_legend();
        assert!(legend[0].achieved);
        assert_eq!(legend[0].coupon_code.as_deref(), Some("MS3"));
        assert!(wheel.view().coupon.milestone.is_some());
    }

    #[test]
    fn test_unknown_label_stops_on_first_segment() {
        let wheel = RefCell::new(default_wheel());
        let transport = FakeTransport::replying(200, r#"{"success": true, "label": "Нова награда"}"#);
        let animation = spin(&wheel, &transport).expect("animation");
        let landed = wedges(5, animation.target)[0].mid();
        assert!(angle_distance(landed, POINTER_ANGLE).abs() <= slice_angle(5) / 2.0);
        wheel.borrow_mut().finish_spin();
        assert_eq!(wheel.borrow().view().result.text(), "Нова награда");
    }

    #[test]
    fn test_spin_gated_by_config() {
        let ineligible = wheel_with(r#"{"btnId": "b", "spinUrl": "/spin/", "canSpin": false}"#);
        assert!(!ineligible.can_spin());
        assert!(!ineligible.spin_enabled());

        let no_url = wheel_with(r#"{"btnId": "b"}"#);
        assert!(!no_url.can_spin());

        let no_button = wheel_with(r#"{"spinUrl": "/spin/"}"#);
        assert!(!no_button.can_spin());
        assert!(no_button.spin_enabled());
    }

    #[test]
    fn test_stray_reply_is_ignored() {
        let mut wheel = default_wheel();
        let step = wheel.receive(Ok(HttpReply::new(200, r#"{"success": true, "label": "A"}"#)), &mut rng());
        assert_eq!(step, SpinStep::Settled);
        assert!(wheel.can_spin());
    }
}
