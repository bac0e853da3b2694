use async_trait::async_trait;
use log::{debug, info, trace, warn};
use rand::random;
use sdp::{MediaDirection, SDP};
use tokio::select;

use crate::session::SessionContext;
use crate::signaling::{SignalFrame, SignalingEvent, SubscribeAck, SubscribeRequest};
use crate::tasks::{SessionStatusCode, SessionTask, TaskCanceler, TaskError, TaskStatus};
use crate::transceiver::EncodingParameters;

type CancelReceiver = tokio::sync::mpsc::UnboundedReceiver<()>;
type EventReceiver = tokio::sync::mpsc::UnboundedReceiver<SignalingEvent>;

/// One subscribe round. Sends the local offer together with the wanted
/// stream ids and waits for the server's acknowledgment. The session
/// context is only mutated once the acknowledgment arrived, a round that
/// fails or gets canceled leaves it untouched.
pub struct SubscribeExchange {
    status: TaskStatus,
    canceler: TaskCanceler,
    cancel_receiver: CancelReceiver,
    observer_id: usize,
}

impl SubscribeExchange {
    pub fn new() -> Self {
        let (sender, receiver) = tokio::sync::mpsc::unbounded_channel::<()>();
        SubscribeExchange {
            status: TaskStatus::Pending,
            canceler: TaskCanceler::new(sender),
            cancel_receiver: receiver,
            observer_id: random::<usize>(),
        }
    }

    async fn exchange(&mut self, context: &mut SessionContext) -> Result<(), TaskError> {
        let local_sdp = resolve_local_offer(context)?;

        if !context.configuration.enable_simulcast {
            let parameter = &context.video_capture_and_encode_parameter;
            let encoding = EncodingParameters {
                rid: Some(String::from("hi")),
                max_bitrate_bps: u64::from(parameter.max_encode_bitrate_kbps) * 1000,
                max_framerate: Some(parameter.camera_frame_rate),
                scale_resolution_down_by: 1.0,
                active: true,
            };
            context
                .video_stream_index
                .integrate_uplink_policy_decision(&[encoding]);
        }
        context.video_stream_index.subscribe_frame_sent();

        let receive_stream_ids = if context
            .configuration
            .runtime
            .requires_strict_subscription_order
        {
            fix_up_subscription_order(&local_sdp, &context.video_subscriptions)
        } else {
            context.video_subscriptions.clone()
        };

        let request = SubscribeRequest {
            attendee_id: context.configuration.attendee_id.clone(),
            sdp_offer: local_sdp.as_str().to_string(),
            audio_host_url: context.configuration.audio_host_url.clone(),
            audio_muted: context.audio_muted,
            audio_checkin: false,
            receive_stream_ids,
            local_video_enabled: context.video_duplex_mode.is_sending(),
            video_stream_descriptions: context.video_stream_index.local_stream_descriptions(),
            connection_type_has_video: true,
        };
        match serde_json::to_string(&request) {
            Ok(rendered) => info!(target: "Subscribe Task", "Sending subscribe {}", rendered),
            Err(error) => warn!(
                target: "Subscribe Task",
                "Could not render the subscribe request: {:?}", error
            ),
        }

        // Registration has to happen before the send, an acknowledgment can
        // arrive before the transport would process a later registration.
        let (event_sender, mut event_receiver) =
            tokio::sync::mpsc::unbounded_channel::<SignalingEvent>();
        context
            .signaling
            .register_observer(self.observer_id, event_sender)
            .map_err(|_| TaskError {
                status: SessionStatusCode::TaskFailed,
                message: String::from("Signaling channel is closed"),
            })?;

        let result = match context.signaling.subscribe(request) {
            Ok(()) => self.await_acknowledgment(&mut event_receiver).await,
            Err(_) => Err(TaskError {
                status: SessionStatusCode::TaskFailed,
                message: String::from("Signaling channel is closed"),
            }),
        };
        context.signaling.remove_observer(self.observer_id);

        let ack = result?;
        context.sdp_answer = Some(SDP::new(ack.sdp_answer.clone()));
        context.video_stream_index.integrate_subscribe_ack(&ack);
        context.previous_sdp_offer = Some(local_sdp);
        Ok(())
    }

    async fn await_acknowledgment(
        &mut self,
        events: &mut EventReceiver,
    ) -> Result<SubscribeAck, TaskError> {
        loop {
            select! {
                _ = self.cancel_receiver.recv() => {
                    debug!(target: "Subscribe Task", "Canceled while awaiting the acknowledgment");
                    return Err(canceled());
                }
                event = events.recv() => {
                    match event {
                        Some(SignalingEvent::FrameReceived(SignalFrame::SubscribeAck(ack))) => {
                            trace!(target: "Subscribe Task", "Incoming acknowledgment: {:#?}", ack);
                            return Ok(ack);
                        }
                        Some(SignalingEvent::FrameReceived(frame)) => {
                            trace!(target: "Subscribe Task", "Ignoring frame: {:#?}", frame);
                        }
                        Some(SignalingEvent::ConnectionTerminated { close_code, reason }) => {
                            warn!(
                                target: "Subscribe Task",
                                "Signaling connection terminated with code {}: {}", close_code, reason
                            );
                            return Err(TaskError {
                                status: status_for_close_code(close_code),
                                message: reason,
                            });
                        }
                        None => {
                            return Err(TaskError {
                                status: SessionStatusCode::TaskFailed,
                                message: String::from("Signaling event stream ended"),
                            });
                        }
                    }
                }
            }
        }
    }
}

#[async_trait]
impl SessionTask for SubscribeExchange {
    fn name(&self) -> &'static str {
        "SubscribeExchange"
    }

    fn status(&self) -> TaskStatus {
        self.status
    }

    fn canceler(&self) -> TaskCanceler {
        self.canceler.clone()
    }

    async fn run(&mut self, context: &mut SessionContext) -> Result<(), TaskError> {
        self.status = TaskStatus::Running;

        // A round canceled before it ran must not touch the session, not
        // even to supersede the outstanding round.
        if self.cancel_receiver.try_recv().is_ok() {
            self.status = TaskStatus::Canceled;
            return Err(canceled());
        }

        if let Some(previous) = context.outstanding_subscribe.take() {
            debug!(target: "Subscribe Task", "Superseding the outstanding subscribe round");
            previous.cancel();
        }
        context.outstanding_subscribe = Some(self.canceler.clone());

        let result = self.exchange(context).await;

        // A superseding round may have replaced the canceler by now, only
        // clear the entry while it is still ours.
        let same_round = context
            .outstanding_subscribe
            .as_ref()
            .map(|canceler| canceler.same_channel(&self.canceler))
            .unwrap_or(false);
        if same_round {
            context.outstanding_subscribe = None;
        }

        self.status = match &result {
            Ok(()) => TaskStatus::Completed,
            Err(error) if error.status == SessionStatusCode::TaskCanceled => TaskStatus::Canceled,
            Err(_) => TaskStatus::Failed,
        };
        result
    }
}

fn resolve_local_offer(context: &SessionContext) -> Result<SDP, TaskError> {
    let offer = match &context.local_sdp_offer {
        Some(offer) => offer.clone(),
        None => {
            return Err(TaskError {
                status: SessionStatusCode::TaskFailed,
                message: String::from("No local description is available to subscribe with"),
            })
        }
    };
    if context.configuration.runtime.requires_compatibility_rewrite {
        Ok(offer.with_unified_plan_format())
    } else {
        Ok(offer)
    }
}

/// Realigns subscription values with the receive sections of the local
/// description. Some runtimes order transceivers differently from the
/// subscription list, sending the list as-is would subscribe the wrong
/// slots. Zero marks a slot without a subscription, spare non-zero values
/// are dropped.
fn fix_up_subscription_order(local_sdp: &SDP, subscriptions: &[u32]) -> Vec<u32> {
    let pending = subscriptions
        .iter()
        .copied()
        .filter(|stream_id| *stream_id != 0)
        .collect::<Vec<u32>>();
    let mut next_pending = 0;

    let mut fixed = Vec::new();
    for direction in local_sdp.video_section_directions() {
        if direction != MediaDirection::RecvOnly {
            fixed.push(0);
            continue;
        }
        if next_pending < pending.len() {
            fixed.push(pending[next_pending]);
            next_pending += 1;
        } else {
            warn!(
                target: "Subscribe Task",
                "Ran out of subscription values for a receive section"
            );
            fixed.push(0);
        }
    }
    info!(
        target: "Subscribe Task",
        "Fixed up subscription order from {:?} to {:?}", subscriptions, fixed
    );
    fixed
}

fn canceled() -> TaskError {
    TaskError {
        status: SessionStatusCode::TaskCanceled,
        message: String::from("Subscribe round was canceled"),
    }
}

fn status_for_close_code(close_code: u16) -> SessionStatusCode {
    if (INTERNAL_SERVER_ERROR_LOW..INTERNAL_SERVER_ERROR_HIGH).contains(&close_code) {
        SessionStatusCode::SignalingInternalServerError
    } else {
        SessionStatusCode::TaskFailed
    }
}

static INTERNAL_SERVER_ERROR_LOW: u16 = 4500;
static INTERNAL_SERVER_ERROR_HIGH: u16 = 4600;

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::sync::{Arc, Mutex};

    use sdp::SDP;

    use crate::config::{RuntimeFamily, SessionConfiguration};
    use crate::session::SessionContext;
    use crate::signaling::{
        SignalFrame, SignalingCommand, SignalingCommandReceiver, SignalingEvent,
        SignalingEventSender, SignalingHandle, StreamAllocation, SubscribeAck, SubscribeRequest,
    };
    use crate::tasks::TaskCanceler;
    use crate::transceiver::EncodingParameters;
    use crate::video_index::{LocalVideoDescription, VideoStreamIndex};

    fn init_logging() {
        let _ = env_logger::builder().is_test(true).try_init();
    }

    #[derive(Default)]
    struct IndexCalls {
        policy_decisions: Vec<Vec<EncodingParameters>>,
        sent_frames: usize,
        acks: Vec<SubscribeAck>,
    }

    struct FakeVideoIndex {
        calls: Arc<Mutex<IndexCalls>>,
    }

    impl VideoStreamIndex for FakeVideoIndex {
        fn video_publishing_participants_excluding_self(&self, _attendee_id: &str) -> usize {
            0
        }

        fn integrate_uplink_policy_decision(&mut self, encodings: &[EncodingParameters]) {
            self.calls
                .lock()
                .unwrap()
                .policy_decisions
                .push(encodings.to_vec());
        }

        fn subscribe_frame_sent(&mut self) {
            self.calls.lock().unwrap().sent_frames += 1;
        }

        fn integrate_subscribe_ack(&mut self, ack: &SubscribeAck) {
            self.calls.lock().unwrap().acks.push(ack.clone());
        }

        fn local_stream_descriptions(&self) -> Vec<LocalVideoDescription> {
            vec![LocalVideoDescription {
                stream_id: 1,
                group_id: 1,
                max_bitrate_kbps: 1400,
                attendee_id: String::from("attendee-1"),
            }]
        }
    }

    enum TransportMode {
        Acknowledge(SubscribeAck),
        Terminate { close_code: u16 },
        Stall,
        CancelOnSubscribe(TaskCanceler),
    }

    #[derive(Default)]
    struct TransportLog {
        registrations: usize,
        removals: usize,
        requests: Vec<SubscribeRequest>,
    }

    /// Stand-in for the signaling transport. Runs until the handle side is
    /// dropped and returns everything it observed.
    async fn run_transport(
        mut commands: SignalingCommandReceiver,
        mode: TransportMode,
    ) -> TransportLog {
        let mut observers: HashMap<usize, SignalingEventSender> = HashMap::new();
        let mut log = TransportLog::default();
        while let Some(command) = commands.recv().await {
            match command {
                SignalingCommand::RegisterObserver(id, sender) => {
                    log.registrations += 1;
                    observers.insert(id, sender);
                }
                SignalingCommand::RemoveObserver(id) => {
                    log.removals += 1;
                    observers.remove(&id);
                }
                SignalingCommand::Subscribe(request) => {
                    log.requests.push(request);
                    match &mode {
                        TransportMode::Acknowledge(ack) => {
                            for sender in observers.values() {
                                sender
                                    .send(SignalingEvent::FrameReceived(SignalFrame::Unrecognized))
                                    .ok();
                                sender
                                    .send(SignalingEvent::FrameReceived(
                                        SignalFrame::SubscribeAck(ack.clone()),
                                    ))
                                    .ok();
                            }
                        }
                        TransportMode::Terminate { close_code } => {
                            for sender in observers.values() {
                                sender
                                    .send(SignalingEvent::ConnectionTerminated {
                                        close_code: *close_code,
                                        reason: String::from("signaling dropped the connection"),
                                    })
                                    .ok();
                            }
                        }
                        TransportMode::Stall => {}
                        TransportMode::CancelOnSubscribe(canceler) => canceler.cancel(),
                    }
                }
            }
        }
        log
    }

    fn configuration(runtime: RuntimeFamily) -> SessionConfiguration {
        SessionConfiguration {
            attendee_id: String::from("attendee-1"),
            audio_host_url: String::from("wss://audio.example.com/control"),
            runtime,
            enable_simulcast: false,
        }
    }

    fn context_with(
        runtime: RuntimeFamily,
        signaling: SignalingHandle,
        calls: Arc<Mutex<IndexCalls>>,
    ) -> SessionContext {
        let mut context = SessionContext::new(
            configuration(runtime),
            signaling,
            Box::new(FakeVideoIndex { calls }),
        );
        context.local_sdp_offer = Some(SDP::new(String::from(LOCAL_OFFER)));
        context.video_subscriptions = vec![0, 7];
        context
    }

    fn ack() -> SubscribeAck {
        SubscribeAck {
            sdp_answer: String::from(SDP_ANSWER),
            allocations: vec![StreamAllocation {
                track_label: String::from("v_attendee-1"),
                stream_id: 4,
                group_id: 2,
            }],
        }
    }

    mod run {
        use std::sync::{Arc, Mutex};

        use super::{
            ack, context_with, init_logging, run_transport, IndexCalls, TransportMode, SDP_ANSWER,
        };
        use crate::config::{RuntimeFamily, VideoDuplexMode};
        use crate::signaling::SignalingHandle;
        use crate::tasks::subscribe_task::SubscribeExchange;
        use crate::tasks::{SessionStatusCode, SessionTask, TaskStatus};

        #[tokio::test]
        async fn an_acknowledgment_resolves_the_exchange() {
            init_logging();
            let (signaling, commands) = SignalingHandle::new();
            let transport = tokio::spawn(run_transport(commands, TransportMode::Acknowledge(ack())));
            let calls = Arc::new(Mutex::new(IndexCalls::default()));
            let mut context = context_with(RuntimeFamily::chromium(), signaling, calls.clone());
            context.video_duplex_mode = VideoDuplexMode::Duplex;

            let mut task = SubscribeExchange::new();
            task.run(&mut context)
                .await
                .expect("Should resolve the subscribe round");

            assert_eq!(task.status(), TaskStatus::Completed);
            assert_eq!(
                context.sdp_answer.as_ref().map(|sdp| sdp.as_str()),
                Some(SDP_ANSWER)
            );
            assert!(context.outstanding_subscribe.is_none());
            let previous_offer = context
                .previous_sdp_offer
                .as_ref()
                .map(|sdp| sdp.as_str().to_string())
                .expect("Should retain the sent offer");

            {
                let calls = calls.lock().unwrap();
                assert_eq!(calls.sent_frames, 1);
                assert_eq!(calls.acks.len(), 1);
                assert_eq!(calls.policy_decisions.len(), 1);
                assert_eq!(calls.policy_decisions[0].len(), 1);
                assert_eq!(calls.policy_decisions[0][0].rid.as_deref(), Some("hi"));
            }

            drop(context);
            let log = transport.await.expect("Should drain the transport");
            assert_eq!(log.registrations, 1);
            assert_eq!(log.removals, 1);
            assert_eq!(log.requests.len(), 1);
            let request = &log.requests[0];
            assert_eq!(request.attendee_id, "attendee-1");
            assert_eq!(request.receive_stream_ids, vec![0, 7]);
            assert!(request.local_video_enabled);
            assert_eq!(request.video_stream_descriptions.len(), 1);
            assert!(!request.audio_checkin);
            assert!(request.connection_type_has_video);
            assert!(
                request.sdp_offer.contains("o=mozilla-chrome"),
                "Chromium offers go through the compatibility rewrite"
            );
            assert_eq!(previous_offer, request.sdp_offer);
        }

        #[tokio::test]
        async fn strict_order_runtimes_realign_subscriptions() {
            let (signaling, commands) = SignalingHandle::new();
            let transport = tokio::spawn(run_transport(commands, TransportMode::Acknowledge(ack())));
            let calls = Arc::new(Mutex::new(IndexCalls::default()));
            let mut context = context_with(RuntimeFamily::gecko(), signaling, calls);

            let mut task = SubscribeExchange::new();
            task.run(&mut context)
                .await
                .expect("Should resolve the subscribe round");

            drop(context);
            let log = transport.await.expect("Should drain the transport");
            assert_eq!(log.requests[0].receive_stream_ids, vec![0, 7, 0]);
            assert!(
                !log.requests[0].sdp_offer.contains("mozilla"),
                "Gecko offers are sent unmodified"
            );
            assert!(!log.requests[0].local_video_enabled);
            assert_eq!(
                log.requests[0].video_stream_descriptions.len(),
                1,
                "Receive-only rounds still report the local descriptions"
            );
        }

        #[tokio::test]
        async fn a_new_round_supersedes_the_outstanding_one() {
            let (signaling, commands) = SignalingHandle::new();
            let transport = tokio::spawn(run_transport(commands, TransportMode::Acknowledge(ack())));
            let calls = Arc::new(Mutex::new(IndexCalls::default()));
            let mut context = context_with(RuntimeFamily::chromium(), signaling, calls);

            let mut stale = SubscribeExchange::new();
            context.outstanding_subscribe = Some(stale.canceler());

            let mut task = SubscribeExchange::new();
            task.run(&mut context)
                .await
                .expect("Should resolve the subscribe round");
            assert!(context.outstanding_subscribe.is_none());

            let error = stale
                .run(&mut context)
                .await
                .expect_err("Superseded round should observe its cancellation");
            assert_eq!(error.status, SessionStatusCode::TaskCanceled);
            assert_eq!(stale.status(), TaskStatus::Canceled);

            drop(context);
            transport.await.expect("Should drain the transport");
        }

        #[tokio::test]
        async fn cancellation_before_run_short_circuits() {
            let (signaling, commands) = SignalingHandle::new();
            let transport = tokio::spawn(run_transport(commands, TransportMode::Stall));
            let calls = Arc::new(Mutex::new(IndexCalls::default()));
            let mut context = context_with(RuntimeFamily::chromium(), signaling, calls.clone());

            let mut task = SubscribeExchange::new();
            task.canceler().cancel();

            let error = task
                .run(&mut context)
                .await
                .expect_err("Should cancel the round");
            assert_eq!(error.status, SessionStatusCode::TaskCanceled);
            assert_eq!(task.status(), TaskStatus::Canceled);
            assert_eq!(calls.lock().unwrap().sent_frames, 0);

            drop(context);
            let log = transport.await.expect("Should drain the transport");
            assert_eq!(log.registrations, 0);
            assert_eq!(log.requests.len(), 0);
        }

        #[tokio::test]
        async fn cancellation_while_awaiting_deregisters_the_observer() {
            let (signaling, commands) = SignalingHandle::new();
            let calls = Arc::new(Mutex::new(IndexCalls::default()));
            let mut task = SubscribeExchange::new();
            let transport = tokio::spawn(run_transport(
                commands,
                TransportMode::CancelOnSubscribe(task.canceler()),
            ));
            let mut context = context_with(RuntimeFamily::chromium(), signaling, calls);

            let error = task
                .run(&mut context)
                .await
                .expect_err("Should cancel the round");
            assert_eq!(error.status, SessionStatusCode::TaskCanceled);
            assert_eq!(task.status(), TaskStatus::Canceled);
            assert!(context.outstanding_subscribe.is_none());

            drop(context);
            let log = transport.await.expect("Should drain the transport");
            assert_eq!(log.registrations, 1);
            assert_eq!(log.removals, 1);
        }

        #[tokio::test]
        async fn server_error_close_codes_map_to_internal_server_error() {
            init_logging();
            let (signaling, commands) = SignalingHandle::new();
            let transport = tokio::spawn(run_transport(
                commands,
                TransportMode::Terminate { close_code: 4500 },
            ));
            let calls = Arc::new(Mutex::new(IndexCalls::default()));
            let mut context = context_with(RuntimeFamily::chromium(), signaling, calls.clone());

            let mut task = SubscribeExchange::new();
            let error = task
                .run(&mut context)
                .await
                .expect_err("Should fail the round");

            assert_eq!(error.status, SessionStatusCode::SignalingInternalServerError);
            assert_eq!(task.status(), TaskStatus::Failed);
            assert!(context.sdp_answer.is_none());
            assert!(context.previous_sdp_offer.is_none());
            assert_eq!(calls.lock().unwrap().acks.len(), 0);

            drop(context);
            let log = transport.await.expect("Should drain the transport");
            assert_eq!(log.removals, 1);
        }

        #[tokio::test]
        async fn other_close_codes_map_to_a_generic_failure() {
            let (signaling, commands) = SignalingHandle::new();
            let transport = tokio::spawn(run_transport(
                commands,
                TransportMode::Terminate { close_code: 1006 },
            ));
            let calls = Arc::new(Mutex::new(IndexCalls::default()));
            let mut context = context_with(RuntimeFamily::chromium(), signaling, calls);

            let mut task = SubscribeExchange::new();
            let error = task
                .run(&mut context)
                .await
                .expect_err("Should fail the round");

            assert_eq!(error.status, SessionStatusCode::TaskFailed);
            assert_eq!(task.status(), TaskStatus::Failed);

            drop(context);
            transport.await.expect("Should drain the transport");
        }

        #[tokio::test]
        async fn canceling_a_finished_round_changes_nothing() {
            let (signaling, commands) = SignalingHandle::new();
            let transport = tokio::spawn(run_transport(commands, TransportMode::Acknowledge(ack())));
            let calls = Arc::new(Mutex::new(IndexCalls::default()));
            let mut context = context_with(RuntimeFamily::chromium(), signaling, calls);

            let mut task = SubscribeExchange::new();
            task.run(&mut context)
                .await
                .expect("Should resolve the subscribe round");

            task.canceler().cancel();
            assert_eq!(task.status(), TaskStatus::Completed);

            drop(context);
            let log = transport.await.expect("Should drain the transport");
            assert_eq!(log.removals, 1, "The observer is removed exactly once");
        }

        #[tokio::test]
        async fn a_missing_local_description_fails_fast() {
            let (signaling, commands) = SignalingHandle::new();
            let transport = tokio::spawn(run_transport(commands, TransportMode::Stall));
            let calls = Arc::new(Mutex::new(IndexCalls::default()));
            let mut context = context_with(RuntimeFamily::chromium(), signaling, calls);
            context.local_sdp_offer = None;

            let mut task = SubscribeExchange::new();
            let error = task
                .run(&mut context)
                .await
                .expect_err("Should fail the round");

            assert_eq!(error.status, SessionStatusCode::TaskFailed);
            assert_eq!(task.status(), TaskStatus::Failed);

            drop(context);
            let log = transport.await.expect("Should drain the transport");
            assert_eq!(log.registrations, 0);
        }
    }

    mod fix_up_subscription_order {
        use sdp::SDP;

        use super::LOCAL_OFFER;
        use crate::tasks::subscribe_task::fix_up_subscription_order;

        #[test]
        fn realigns_values_with_the_receive_sections() {
            let local_sdp = SDP::new(String::from(LOCAL_OFFER));

            let fixed = fix_up_subscription_order(&local_sdp, &[0, 7]);

            assert_eq!(fixed, vec![0, 7, 0]);
        }

        #[test]
        fn spare_values_are_dropped() {
            let local_sdp = SDP::new(String::from(
                "v=0\r\n\
                o=- 4611731400430051336 2 IN IP4 127.0.0.1\r\n\
                s=-\r\n\
                m=video 50765 UDP/TLS/RTP/SAVPF 96\r\n\
                a=recvonly\r\n",
            ));

            let fixed = fix_up_subscription_order(&local_sdp, &[4, 5]);

            assert_eq!(fixed, vec![4]);
        }

        #[test]
        fn zero_only_subscriptions_stay_zero() {
            let local_sdp = SDP::new(String::from(LOCAL_OFFER));

            let fixed = fix_up_subscription_order(&local_sdp, &[0, 0]);

            assert_eq!(fixed, vec![0, 0, 0]);
        }
    }

    mod status_for_close_code {
        use crate::tasks::subscribe_task::status_for_close_code;
        use crate::tasks::SessionStatusCode;

        #[test]
        fn the_server_error_range_is_half_open() {
            assert_eq!(
                status_for_close_code(4499),
                SessionStatusCode::TaskFailed
            );
            assert_eq!(
                status_for_close_code(4500),
                SessionStatusCode::SignalingInternalServerError
            );
            assert_eq!(
                status_for_close_code(4599),
                SessionStatusCode::SignalingInternalServerError
            );
            assert_eq!(
                status_for_close_code(4600),
                SessionStatusCode::TaskFailed
            );
        }
    }

    const LOCAL_OFFER: &str = "v=0\r\n\
    o=- 4611731400430051336 2 IN IP4 127.0.0.1\r\n\
    s=-\r\n\
    t=0 0\r\n\
    a=group:BUNDLE audio video video-1 video-2\r\n\
    m=audio 50764 UDP/TLS/RTP/SAVPF 111\r\n\
    c=IN IP4 203.0.113.6\r\n\
    a=mid:audio\r\n\
    a=sendrecv\r\n\
    a=rtpmap:111 opus/48000/2\r\n\
    m=video 50765 UDP/TLS/RTP/SAVPF 96\r\n\
    c=IN IP4 203.0.113.6\r\n\
    a=mid:video\r\n\
    a=sendonly\r\n\
    a=rtpmap:96 VP8/90000\r\n\
    a=ssrc:138880831 cname:5gLLSWtric3h3tLH\r\n\
    m=video 50766 UDP/TLS/RTP/SAVPF 96\r\n\
    c=IN IP4 203.0.113.6\r\n\
    a=mid:video-1\r\n\
    a=recvonly\r\n\
    a=rtpmap:96 VP8/90000\r\n\
    m=video 50767 UDP/TLS/RTP/SAVPF 96\r\n\
    c=IN IP4 203.0.113.6\r\n\
    a=mid:video-2\r\n\
    a=recvonly\r\n\
    a=rtpmap:96 VP8/90000\r\n";

    const SDP_ANSWER: &str = "v=0\r\n\
    o=- 923817495 2 IN IP4 127.0.0.1\r\n\
    s=-\r\n\
    t=0 0\r\n\
    m=audio 9 UDP/TLS/RTP/SAVPF 111\r\n\
    a=sendrecv\r\n\
    m=video 9 UDP/TLS/RTP/SAVPF 96\r\n\
    a=recvonly\r\n";
}
