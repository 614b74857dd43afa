//! Document set model and submission readiness gate.
//!
//! A [`DocumentSet`] is a fixed layout of named upload slots. Each slot holds
//! zero or one file, except multi-file slots which hold up to their capacity.
//! The set only changes through [`DocumentSet::add_files`] and
//! [`DocumentSet::remove_file`].
//!
//! ```text
//! emirates_id       [x]  required
//! driving_license   [ ]  required
//! vehicle_registry  [x]  required
//! claim_form        [x]  required
//! damaged_photos    [3]  required, up to 5
//! police_report     [ ]  optional
//! ```

use crate::accept::{AllowList, CLAIM_ACCEPT, WORKSHOP_ACCEPT};
use crate::config::MAX_DAMAGED_PHOTOS;
use crate::error::{SlotError, SlotResult};

// =============================================================================
// File Handles
// =============================================================================

/// Anything that can be uploaded: a file read from disk, a browser `File`, ...
pub trait FileHandle: Clone {
    /// File name as shown to the user and sent in the multipart part.
    fn name(&self) -> String;

    /// Size in bytes.
    fn size(&self) -> u64;
}

// =============================================================================
// Slot Layouts
// =============================================================================

/// How many files a slot holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlotKind {
    /// Zero or one file; adding replaces.
    Single,
    /// Up to `max` files; adding appends, then keeps the first `max`.
    Multi { max: usize },
}

/// Static description of one slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SlotSpec {
    /// Multipart field name and stable key.
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub required: bool,
    pub kind: SlotKind,
    pub accept: AllowList,
}

impl SlotSpec {
    const fn single(
        id: &'static str,
        name: &'static str,
        description: &'static str,
        required: bool,
        accept: AllowList,
    ) -> Self {
        Self {
            id,
            name,
            description,
            required,
            kind: SlotKind::Single,
            accept,
        }
    }
}

/// Slots for a motor claim, in submission order.
pub const CLAIM_LAYOUT: [SlotSpec; 6] = [
    SlotSpec::single("emirates_id", "Emirates ID", "Front and back of the claimant's Emirates ID", true, CLAIM_ACCEPT),
    SlotSpec::single("driving_license", "Driving License", "Valid driving license of the driver", true, CLAIM_ACCEPT),
    SlotSpec::single("vehicle_registry", "Vehicle Registration", "Mulkiya / vehicle registration card", true, CLAIM_ACCEPT),
    SlotSpec::single("claim_form", "Claim Form", "Completed and signed claim form", true, CLAIM_ACCEPT),
    SlotSpec {
        id: "damaged_photos",
        name: "Damaged Vehicle Photos",
        description: "Clear photos of the damage from several angles",
        required: true,
        kind: SlotKind::Multi { max: MAX_DAMAGED_PHOTOS },
        accept: CLAIM_ACCEPT,
    },
    SlotSpec::single("police_report", "Police Report", "Police report, if one was filed", false, CLAIM_ACCEPT),
];

/// The three workshop quotations compared by the workshop report.
pub const WORKSHOP_LAYOUT: [SlotSpec; 3] = [
    SlotSpec::single("workshop1", "Workshop 1", "Repair estimate from the first workshop", true, WORKSHOP_ACCEPT),
    SlotSpec::single("workshop2", "Workshop 2", "Repair estimate from the second workshop", true, WORKSHOP_ACCEPT),
    SlotSpec::single("workshop3", "Workshop 3", "Repair estimate from the third workshop", true, WORKSHOP_ACCEPT),
];

// =============================================================================
// Slots
// =============================================================================

/// One upload target and the files currently in it.
#[derive(Debug, Clone, PartialEq)]
pub struct DocumentSlot<F> {
    spec: SlotSpec,
    files: Vec<F>,
}

impl<F> DocumentSlot<F> {
    fn new(spec: SlotSpec) -> Self {
        Self { spec, files: Vec::new() }
    }

    pub fn id(&self) -> &'static str {
        self.spec.id
    }

    pub fn name(&self) -> &'static str {
        self.spec.name
    }

    pub fn description(&self) -> &'static str {
        self.spec.description
    }

    pub fn required(&self) -> bool {
        self.spec.required
    }

    pub fn kind(&self) -> SlotKind {
        self.spec.kind
    }

    pub fn is_multi(&self) -> bool {
        matches!(self.spec.kind, SlotKind::Multi { .. })
    }

    /// Most files this slot holds.
    pub fn capacity(&self) -> usize {
        match self.spec.kind {
            SlotKind::Single => 1,
            SlotKind::Multi { max } => max,
        }
    }

    pub fn accept(&self) -> AllowList {
        self.spec.accept
    }

    /// Derived from the file list; there is no separate flag to drift.
    pub fn uploaded(&self) -> bool {
        !self.files.is_empty()
    }

    pub fn files(&self) -> &[F] {
        &self.files
    }
}

// =============================================================================
// Document Set
// =============================================================================

/// Identifies the exact contents of a document set.
///
/// Two sets with the same files in the same slots produce equal keys, which
/// is what the one-shot request uses to avoid resubmitting.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SubmissionKey(Vec<(&'static str, String, u64)>);

impl SubmissionKey {
    /// Number of multipart parts the key describes.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// A fixed set of document slots for one submission session.
#[derive(Debug, Clone, PartialEq)]
pub struct DocumentSet<F> {
    slots: Vec<DocumentSlot<F>>,
}

impl<F: FileHandle> DocumentSet<F> {
    /// Empty set with the given layout.
    pub fn from_layout(layout: &[SlotSpec]) -> Self {
        Self {
            slots: layout.iter().copied().map(DocumentSlot::new).collect(),
        }
    }

    /// Empty motor-claim set.
    pub fn claim() -> Self {
        Self::from_layout(&CLAIM_LAYOUT)
    }

    /// Empty three-workshop set.
    pub fn workshop() -> Self {
        Self::from_layout(&WORKSHOP_LAYOUT)
    }

    pub fn slots(&self) -> &[DocumentSlot<F>] {
        &self.slots
    }

    pub fn slot(&self, id: &str) -> Option<&DocumentSlot<F>> {
        self.slots.iter().find(|s| s.id() == id)
    }

    fn slot_mut(&mut self, id: &str) -> SlotResult<&mut DocumentSlot<F>> {
        self.slots
            .iter_mut()
            .find(|s| s.id() == id)
            .ok_or_else(|| SlotError::UnknownSlot(id.to_string()))
    }

    /// Put files into a slot and return how many it now holds.
    ///
    /// Single-file slots are replaced by the first offered file. Multi-file
    /// slots append and then keep the first `max` files of the
    /// concatenation, so files beyond capacity are dropped from the newly
    /// added ones. An empty `files` (cancelled dialog) changes nothing.
    pub fn add_files(&mut self, slot_id: &str, files: impl IntoIterator<Item = F>) -> SlotResult<usize> {
        let slot = self.slot_mut(slot_id)?;
        let mut incoming = files.into_iter().peekable();
        if incoming.peek().is_none() {
            return Ok(slot.files.len());
        }

        match slot.spec.kind {
            SlotKind::Single => {
                slot.files.clear();
                slot.files.extend(incoming.take(1));
            }
            SlotKind::Multi { max } => {
                slot.files.extend(incoming);
                slot.files.truncate(max);
            }
        }

        log::debug!("slot {} now holds {} file(s)", slot_id, slot.files.len());
        Ok(slot.files.len())
    }

    /// Remove a file from a slot.
    ///
    /// Multi-file slots need `index`; the remaining files close up the gap.
    /// Single-file slots are cleared and `index` is ignored.
    pub fn remove_file(&mut self, slot_id: &str, index: Option<usize>) -> SlotResult<()> {
        let slot = self.slot_mut(slot_id)?;
        match slot.spec.kind {
            SlotKind::Single => slot.files.clear(),
            SlotKind::Multi { .. } => {
                let len = slot.files.len();
                match index {
                    Some(i) if i < len => {
                        slot.files.remove(i);
                    }
                    Some(i) => {
                        return Err(SlotError::IndexOutOfRange {
                            slot: slot_id.to_string(),
                            index: i,
                            len,
                        })
                    }
                    None => return Err(SlotError::MissingIndex(slot_id.to_string())),
                }
            }
        }
        Ok(())
    }

    /// Every required slot has at least one file.
    pub fn is_ready(&self) -> bool {
        self.remaining_required_count() == 0
    }

    /// Required slots still empty.
    pub fn remaining_required_count(&self) -> usize {
        self.slots.iter().filter(|s| s.required() && !s.uploaded()).count()
    }

    /// User-facing hint while the set is not ready.
    pub fn readiness_message(&self) -> Option<String> {
        match self.remaining_required_count() {
            0 => None,
            1 => Some("Upload 1 more required document".to_string()),
            n => Some(format!("Upload {} more required documents", n)),
        }
    }

    /// Multipart plan: one `(field name, file)` per file, in slot order.
    pub fn parts(&self) -> impl Iterator<Item = (&'static str, &F)> + '_ {
        self.slots
            .iter()
            .flat_map(|slot| slot.files.iter().map(move |f| (slot.id(), f)))
    }

    /// Total files across all slots.
    pub fn file_count(&self) -> usize {
        self.slots.iter().map(|s| s.files.len()).sum()
    }

    pub fn submission_key(&self) -> SubmissionKey {
        SubmissionKey(self.parts().map(|(id, f)| (id, f.name(), f.size())).collect())
    }

    /// Empty every slot, keeping the layout.
    pub fn clear(&mut self) {
        for slot in &mut self.slots {
            slot.files.clear();
        }
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use super::FileHandle;

    /// Named stand-in for a real file.
    #[derive(Debug, Clone, PartialEq, Eq)]
    pub struct Doc(pub String);

    impl Doc {
        pub fn new(name: &str) -> Self {
            Doc(name.to_string())
        }
    }

    impl FileHandle for Doc {
        fn name(&self) -> String {
            self.0.clone()
        }

        fn size(&self) -> u64 {
            self.0.len() as u64
        }
    }

    pub fn docs(names: &[&str]) -> Vec<Doc> {
        names.iter().map(|n| Doc::new(n)).collect()
    }

    /// Claim set with every required slot filled.
    pub fn ready_claim() -> super::DocumentSet<Doc> {
        let mut set = super::DocumentSet::claim();
        set.add_files("emirates_id", docs(&["eid.pdf"])).unwrap();
        set.add_files("driving_license", docs(&["dl.jpg"])).unwrap();
        set.add_files("vehicle_registry", docs(&["mulkiya.png"])).unwrap();
        set.add_files("claim_form", docs(&["form.pdf"])).unwrap();
        set.add_files("damaged_photos", docs(&["front.jpg", "side.jpg"])).unwrap();
        set
    }
}

#[cfg(test)]
mod tests {
    use super::testing::{docs, ready_claim, Doc};
    use super::*;
    use proptest::prelude::*;

    fn names(set: &DocumentSet<Doc>, id: &str) -> Vec<String> {
        set.slot(id).unwrap().files().iter().map(|d| d.0.clone()).collect()
    }

    #[test]
    fn test_claim_layout() {
        let set = DocumentSet::<Doc>::claim();
        let ids: Vec<_> = set.slots().iter().map(|s| s.id()).collect();
        assert_eq!(
            ids,
            ["emirates_id", "driving_license", "vehicle_registry", "claim_form", "damaged_photos", "police_report"]
        );
        assert_eq!(set.remaining_required_count(), 5);
        assert!(!set.slot("police_report").unwrap().required());
        assert_eq!(set.slot("damaged_photos").unwrap().capacity(), 5);
    }

    #[test]
    fn test_single_slot_replaces() {
        let mut set = DocumentSet::claim();
        set.add_files("claim_form", docs(&["old.pdf"])).unwrap();
        set.add_files("claim_form", docs(&["new.pdf", "extra.pdf"])).unwrap();
        assert_eq!(names(&set, "claim_form"), ["new.pdf"]);
        assert!(set.slot("claim_form").unwrap().uploaded());
    }

    #[test]
    fn test_multi_slot_keeps_first_five_of_concatenation() {
        let mut set = DocumentSet::claim();
        set.add_files("damaged_photos", docs(&["a", "b", "c"])).unwrap();
        let held = set.add_files("damaged_photos", docs(&["d", "e", "f"])).unwrap();
        assert_eq!(held, 5);
        assert_eq!(names(&set, "damaged_photos"), ["a", "b", "c", "d", "e"]);
    }

    #[test]
    fn test_multi_slot_truncates_single_oversized_batch() {
        let mut set = DocumentSet::claim();
        set.add_files("damaged_photos", docs(&["1", "2", "3", "4", "5", "6"])).unwrap();
        assert_eq!(names(&set, "damaged_photos"), ["1", "2", "3", "4", "5"]);
    }

    #[test]
    fn test_empty_add_is_noop() {
        let mut set = DocumentSet::claim();
        set.add_files("emirates_id", docs(&["eid.pdf"])).unwrap();
        let held = set.add_files("emirates_id", Vec::new()).unwrap();
        assert_eq!(held, 1);
        assert_eq!(names(&set, "emirates_id"), ["eid.pdf"]);
    }

    #[test]
    fn test_unknown_slot() {
        let mut set = DocumentSet::<Doc>::claim();
        let err = set.add_files("passport", docs(&["p.pdf"])).unwrap_err();
        assert_eq!(err, SlotError::UnknownSlot("passport".into()));
        assert!(set.remove_file("passport", None).is_err());
    }

    #[test]
    fn test_remove_reindexes() {
        let mut set = DocumentSet::claim();
        set.add_files("damaged_photos", docs(&["a", "b", "c"])).unwrap();
        set.remove_file("damaged_photos", Some(1)).unwrap();
        assert_eq!(names(&set, "damaged_photos"), ["a", "c"]);
        set.remove_file("damaged_photos", Some(1)).unwrap();
        assert_eq!(names(&set, "damaged_photos"), ["a"]);
    }

    #[test]
    fn test_remove_last_photo_clears_uploaded() {
        let mut set = DocumentSet::claim();
        set.add_files("damaged_photos", docs(&["a"])).unwrap();
        set.remove_file("damaged_photos", Some(0)).unwrap();
        assert!(!set.slot("damaged_photos").unwrap().uploaded());
    }

    #[test]
    fn test_remove_errors_on_multi_slot() {
        let mut set = DocumentSet::claim();
        set.add_files("damaged_photos", docs(&["a"])).unwrap();
        assert_eq!(
            set.remove_file("damaged_photos", Some(3)),
            Err(SlotError::IndexOutOfRange {
                slot: "damaged_photos".into(),
                index: 3,
                len: 1
            })
        );
        assert_eq!(
            set.remove_file("damaged_photos", None),
            Err(SlotError::MissingIndex("damaged_photos".into()))
        );
    }

    #[test]
    fn test_remove_single_ignores_index() {
        let mut set = DocumentSet::claim();
        set.add_files("claim_form", docs(&["form.pdf"])).unwrap();
        set.remove_file("claim_form", Some(42)).unwrap();
        assert!(!set.slot("claim_form").unwrap().uploaded());
    }

    #[test]
    fn test_optional_slot_does_not_gate() {
        let set = ready_claim();
        assert!(set.is_ready());
        assert!(!set.slot("police_report").unwrap().uploaded());
        assert_eq!(set.readiness_message(), None);
    }

    #[test]
    fn test_readiness_message() {
        let mut set = ready_claim();
        set.remove_file("claim_form", None).unwrap();
        assert_eq!(set.readiness_message().as_deref(), Some("Upload 1 more required document"));
        set.remove_file("emirates_id", None).unwrap();
        assert_eq!(set.readiness_message().as_deref(), Some("Upload 2 more required documents"));
    }

    #[test]
    fn test_parts_repeat_multi_field() {
        let mut set = ready_claim();
        set.add_files("police_report", docs(&["police.pdf"])).unwrap();
        let parts: Vec<_> = set.parts().map(|(id, f)| (id, f.0.as_str())).collect();
        assert_eq!(
            parts,
            [
                ("emirates_id", "eid.pdf"),
                ("driving_license", "dl.jpg"),
                ("vehicle_registry", "mulkiya.png"),
                ("claim_form", "form.pdf"),
                ("damaged_photos", "front.jpg"),
                ("damaged_photos", "side.jpg"),
                ("police_report", "police.pdf"),
            ]
        );
        assert_eq!(set.file_count(), 7);
    }

    #[test]
    fn test_submission_key_tracks_contents() {
        let a = ready_claim();
        let mut b = ready_claim();
        assert_eq!(a.submission_key(), b.submission_key());

        b.add_files("damaged_photos", docs(&["rear.jpg"])).unwrap();
        assert_ne!(a.submission_key(), b.submission_key());
        assert_eq!(b.submission_key().len(), 7);
    }

    #[test]
    fn test_workshop_layout_needs_all_three() {
        let mut set = DocumentSet::workshop();
        set.add_files("workshop1", docs(&["w1.pdf"])).unwrap();
        set.add_files("workshop2", docs(&["w2.pdf"])).unwrap();
        assert!(!set.is_ready());
        set.add_files("workshop3", docs(&["w3.pdf"])).unwrap();
        assert!(set.is_ready());
        assert!(set.slots().iter().all(|s| s.capacity() == 1));
    }

    #[test]
    fn test_clear_keeps_layout() {
        let mut set = ready_claim();
        set.clear();
        assert_eq!(set.file_count(), 0);
        assert_eq!(set.slots().len(), 6);
    }

    proptest! {
        #[test]
        fn prop_ready_iff_required_slots_filled(
            required in proptest::collection::vec(any::<bool>(), 1..8),
            counts in proptest::collection::vec(0..4usize, 8),
        ) {
            let ids = ["s0", "s1", "s2", "s3", "s4", "s5", "s6", "s7"];
            let layout: Vec<SlotSpec> = required
                .iter()
                .enumerate()
                .map(|(i, &req)| SlotSpec {
                    id: ids[i],
                    name: ids[i],
                    description: "",
                    required: req,
                    kind: if i % 2 == 0 { SlotKind::Single } else { SlotKind::Multi { max: 5 } },
                    accept: CLAIM_ACCEPT,
                })
                .collect();

            let mut set = DocumentSet::<Doc>::from_layout(&layout);
            for (i, spec) in layout.iter().enumerate() {
                let files: Vec<Doc> = (0..counts[i]).map(|n| Doc(format!("{}-{}.pdf", spec.id, n))).collect();
                set.add_files(spec.id, files).unwrap();
            }

            let expected = layout
                .iter()
                .enumerate()
                .all(|(i, spec)| !spec.required || counts[i] > 0);
            prop_assert_eq!(set.is_ready(), expected);

            let missing = layout
                .iter()
                .enumerate()
                .filter(|(i, spec)| spec.required && counts[*i] == 0)
                .count();
            prop_assert_eq!(set.remaining_required_count(), missing);

            for slot in set.slots() {
                prop_assert_eq!(slot.uploaded(), !slot.files().is_empty());
                prop_assert!(slot.files().len() <= slot.capacity());
            }
        }
    }
}
