//! Public-API tests: an inbox presenter bound to the reference list.
//!
//! Tests validate:
//! 1. A minimal presenter works with every default
//! 2. Edits keep cached heights aligned with rows
//! 3. Swipe actions and selection reach the presenter
//! 4. Scroll events reach a registered observer

use listbind::{
    ConfigurableView, ErrorPolicy, Height, IdentifiableView, ListBinding, ListController,
    ListItemView, ListPresenter, Model, ModelView, Point, RowAddress, RowAnimation, RowHeight,
    ScrollEvent, ScrollObserver, Size, SwipeAction, SwipeActions, ViewHeight, ViewPoolExt,
    VirtualList,
};
use listbind::virtual_list::SwipeEdge;
use std::cell::RefCell;
use std::rc::Rc;

// ===== Views =====

/// Mail row: one line for the subject, a second when there is a preview.
#[derive(Debug, Default)]
struct MailRow {
    mail: Option<Mail>,
}

#[derive(Debug, Clone, PartialEq)]
struct Mail {
    subject: String,
    preview: Option<String>,
}

impl Mail {
    fn new(subject: &str) -> Self {
        Self {
            subject: subject.to_string(),
            preview: None,
        }
    }

    fn with_preview(mut self, preview: &str) -> Self {
        self.preview = Some(preview.to_string());
        self
    }
}

impl ModelView for MailRow {
    type Model = Mail;

    fn configure(&mut self, model: &Mail) {
        self.mail = Some(model.clone());
    }
}

impl ListItemView for MailRow {
    fn fitting_height(&mut self, _width: f64) -> f64 {
        match &self.mail {
            Some(mail) if mail.subject.is_empty() => 0.0,
            Some(mail) if mail.preview.is_some() => 40.0,
            Some(_) => 24.0,
            None => 0.0,
        }
    }

    fn as_configurable(&mut self) -> Option<&mut dyn ConfigurableView> {
        Some(self)
    }

    fn prepare_for_reuse(&mut self) {
        self.mail = None;
    }
}

impl IdentifiableView for MailRow {}

/// Section title bar.
#[derive(Debug, Default)]
struct TitleBar;

impl ListItemView for TitleBar {
    fn fitting_height(&mut self, _width: f64) -> f64 {
        18.0
    }
}

impl IdentifiableView for TitleBar {}

// ===== Presenter =====

#[derive(Debug, Default)]
struct Inbox {
    folders: Vec<(String, Vec<Mail>)>,
    opened: Vec<RowAddress>,
}

impl Inbox {
    fn new(folders: &[(&str, &[Mail])]) -> Self {
        Self {
            folders: folders
                .iter()
                .map(|(name, mails)| (name.to_string(), mails.to_vec()))
                .collect(),
            opened: Vec::new(),
        }
    }

    fn mail(&self, address: RowAddress) -> Option<&Mail> {
        self.folders.get(address.section)?.1.get(address.row)
    }
}

impl ListPresenter for Inbox {
    fn section_count(&self) -> usize {
        self.folders.len()
    }

    fn row_count(&self, section: usize) -> usize {
        self.folders.get(section).map_or(0, |(_, mails)| mails.len())
    }

    fn row_identifier(&self, _address: RowAddress) -> String {
        MailRow::view_identifier().to_string()
    }

    fn row_model(&self, address: RowAddress) -> Option<Model> {
        let mail = self.mail(address)?;
        Some(Box::new(mail.clone()))
    }

    fn row_did_select(&mut self, address: RowAddress) {
        self.opened.push(address);
    }

    fn trailing_swipe_actions(&self, _address: RowAddress) -> Option<SwipeActions> {
        Some(SwipeActions::new(vec![
            SwipeAction::destructive("Delete"),
            SwipeAction::new("Archive"),
        ]))
    }

    fn header_identifier(&self, _section: usize) -> Option<String> {
        Some(TitleBar::view_identifier().to_string())
    }

    /// The unread folder sits at the top without a title bar.
    fn header_height(&self, section: usize) -> ViewHeight {
        match self.folders.get(section) {
            Some((name, _)) if name == "Unread" => ViewHeight::None,
            _ => ViewHeight::Flexible,
        }
    }
}

type InboxList = ListController<Inbox, VirtualList>;

fn inbox(folders: &[(&str, &[Mail])]) -> InboxList {
    let mut controller = ListController::with_binding(
        ListBinding::with_error_policy(Inbox::new(folders), ErrorPolicy::Panic),
        VirtualList::new(Size::new(320.0, 100.0)),
    );
    controller.configure(|list| {
        list.pool_mut().register_view::<MailRow>();
        list.pool_mut().register_view::<TitleBar>();
    });
    layout(&mut controller);
    controller
}

fn layout(controller: &mut InboxList) {
    let (list, binding) = controller.parts_mut();
    list.layout(binding);
}

fn row_heights(controller: &InboxList) -> Vec<Vec<Height>> {
    controller.binding().cache().rows().to_vec()
}

fn standard_inbox() -> InboxList {
    inbox(&[
        (
            "Unread",
            &[Mail::new("Lunch?"), Mail::new("Invoice").with_preview("Due Friday")],
        ),
        ("Archive", &[Mail::new("Old news")]),
    ])
}

// ===== Property 1: Minimal presenter =====

struct Numbers(usize);

impl ListPresenter for Numbers {
    fn row_count(&self, _section: usize) -> usize {
        self.0
    }

    fn row_identifier(&self, _address: RowAddress) -> String {
        MailRow::view_identifier().to_string()
    }

    fn row_model(&self, address: RowAddress) -> Option<Model> {
        Some(Box::new(Mail::new(&address.row.to_string())))
    }
}

#[test]
fn minimal_presenter_uses_defaults() {
    let mut controller = ListController::with_binding(
        ListBinding::with_error_policy(Numbers(3), ErrorPolicy::Panic),
        VirtualList::new(Size::new(100.0, 50.0)),
    );
    controller.configure(|list| list.pool_mut().register_view::<MailRow>());
    let (list, binding) = controller.parts_mut();
    list.layout(binding);

    assert_eq!(list.row_counts(), vec![3]);
    assert_eq!(list.content_height(), 72.0);
    assert_eq!(binding.presenter().row_height(RowAddress::new(0, 0)), RowHeight::Flexible);
    assert!(list
        .swipe_actions(RowAddress::new(0, 0), SwipeEdge::Trailing, binding)
        .is_none());
}

// ===== Property 2: Edits keep heights aligned =====

#[test]
fn hidden_and_flexible_headers_are_laid_out() {
    let controller = standard_inbox();

    // 24 + 40, then the 18-high title bar, then 24.
    assert_eq!(controller.list().content_height(), 106.0);
    assert_eq!(
        controller.binding().cache().headers().to_vec(),
        vec![Height::Unmeasured, Height::Measured(18.0)]
    );
}

#[test]
fn deleting_a_folder_keeps_the_other_folders_heights() {
    let mut controller = standard_inbox();

    controller.presenter_mut().folders.remove(0);
    controller.delete_sections(&[0], RowAnimation::Fade);
    layout(&mut controller);

    assert_eq!(row_heights(&controller), vec![vec![Height::Measured(24.0)]]);
    assert_eq!(
        controller.binding().cache().headers().to_vec(),
        vec![Height::Measured(18.0)]
    );
    assert_eq!(controller.list().content_height(), 42.0);
}

#[test]
fn reloading_a_mail_remeasures_only_that_row() {
    let mut controller = standard_inbox();

    controller.presenter_mut().folders[0].1[0] = Mail::new("Lunch?").with_preview("12:30?");
    controller.reload_rows(&[RowAddress::new(0, 0)], RowAnimation::Automatic);

    assert_eq!(
        row_heights(&controller),
        vec![
            vec![Height::Unmeasured, Height::Measured(40.0)],
            vec![Height::Measured(24.0)],
        ]
    );

    layout(&mut controller);
    assert_eq!(controller.list().content_height(), 122.0);
}

#[test]
fn moving_a_mail_between_folders_carries_its_height() {
    let mut controller = standard_inbox();

    let mail = controller.presenter_mut().folders[0].1.remove(1);
    controller.presenter_mut().folders[1].1.insert(0, mail);
    controller.move_row(RowAddress::new(0, 1), RowAddress::new(1, 0));

    assert_eq!(
        row_heights(&controller),
        vec![
            vec![Height::Measured(24.0)],
            vec![Height::Measured(40.0), Height::Measured(24.0)],
        ]
    );
}

// ===== Property 3: Selection and swipe actions =====

#[test]
fn tapping_a_mail_opens_it() {
    let mut controller = standard_inbox();
    let (list, binding) = controller.parts_mut();

    assert_eq!(list.tap(Point::new(10.0, 30.0), binding), Some(RowAddress::new(0, 1)));
    assert_eq!(binding.presenter().opened, vec![RowAddress::new(0, 1)]);
}

#[test]
fn trailing_swipe_offers_delete_first() {
    let controller = standard_inbox();

    let actions = controller
        .list()
        .swipe_actions(RowAddress::new(1, 0), SwipeEdge::Trailing, controller.binding())
        .expect("rows are editable");

    assert_eq!(actions.actions[0], SwipeAction::destructive("Delete"));
    assert!(actions.performs_first_action_with_full_swipe);
}

// ===== Property 4: Scroll forwarding =====

#[derive(Default)]
struct Offsets(Vec<f64>);

impl ScrollObserver for Offsets {
    fn scroll_event(&mut self, event: &mut ScrollEvent) {
        if let ScrollEvent::DidScroll { offset } = event {
            self.0.push(offset.y);
        }
    }
}

#[test]
fn scroll_offsets_reach_observer_until_dropped() {
    let mut controller = standard_inbox();
    let observer = Rc::new(RefCell::new(Offsets::default()));
    controller.forward_scroll_events(&observer);

    {
        let (list, binding) = controller.parts_mut();
        list.scroll_to(4.0, binding);
        list.scroll_to(50.0, binding);
    }
    assert_eq!(observer.borrow().0, vec![4.0, 6.0]);

    drop(observer);
    let (list, binding) = controller.parts_mut();
    list.scroll_to(0.0, binding);
    assert_eq!(list.offset(), 0.0);
}
