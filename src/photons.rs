use log::{debug, trace};
use std::collections::btree_map::{self, BTreeMap};
use std::ops::{Add, AddAssign, Deref};

/// A point or direction in space.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Vector3 {
    /// X coordinate, in cm.
    pub x: f64,
    /// Y coordinate, in cm.
    pub y: f64,
    /// Z coordinate, in cm.
    pub z: f64,
}

impl Vector3 {
    /// Creates a vector from its coordinates.
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }
}

/// A single simulated optical photon that arrived at a photon detector.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct OnePhoton {
    /// Whether the photon reached a sensitive detector.
    pub in_sd: bool,
    /// Point where the photon was created.
    pub initial_position: Vector3,
    /// Point of arrival, in the detector's local frame.
    pub final_local_position: Vector3,
    /// Arrival time in ns.
    pub time: f32,
    /// Photon energy.
    pub energy: f32,
    /// Track ID of the particle that produced the photon.
    pub mother_track_id: i32,
}

/// All the photons detected by a single optical channel.
///
/// Merging two lists with `+` or `+=` appends the photons of the right-hand
/// side after the ones of the left-hand side. Photons are neither sorted nor
/// deduplicated and the channel of the left-hand side is kept.
///
/// # Examples
///
/// ```
/// use dataobj::photons::{OnePhoton, SimPhotons};
///
/// let mut first = SimPhotons::with_channel(4);
/// first.push(OnePhoton { time: 1.0, ..Default::default() });
/// let second: SimPhotons = [OnePhoton { time: 2.0, ..Default::default() }]
///     .into_iter()
///     .collect();
///
/// first += &second;
/// assert_eq!(first.len(), 2);
/// assert_eq!(first[1].time, 2.0);
/// assert_eq!(first.op_channel(), 4);
/// ```
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SimPhotons {
    op_channel: i32,
    photons: Vec<OnePhoton>,
}

impl SimPhotons {
    /// Creates an empty list for channel 0.
    pub fn new() -> Self {
        Self::default()
    }
    /// Creates an empty list for the given optical channel.
    pub fn with_channel(op_channel: i32) -> Self {
        Self {
            op_channel,
            photons: Vec::new(),
        }
    }
    /// Optical channel the photons belong to.
    pub fn op_channel(&self) -> i32 {
        self.op_channel
    }
    /// Assigns the photons to another optical channel.
    pub fn set_channel(&mut self, op_channel: i32) {
        self.op_channel = op_channel;
    }
    /// Appends a photon to the end of the list.
    pub fn push(&mut self, photon: OnePhoton) {
        self.photons.push(photon);
    }
}

impl Deref for SimPhotons {
    type Target = [OnePhoton];

    fn deref(&self) -> &Self::Target {
        &self.photons
    }
}

impl Extend<OnePhoton> for SimPhotons {
    fn extend<T>(&mut self, iter: T)
    where
        T: IntoIterator<Item = OnePhoton>,
    {
        self.photons.extend(iter);
    }
}

impl FromIterator<OnePhoton> for SimPhotons {
    fn from_iter<T>(iter: T) -> Self
    where
        T: IntoIterator<Item = OnePhoton>,
    {
        Self {
            op_channel: 0,
            photons: iter.into_iter().collect(),
        }
    }
}

impl IntoIterator for SimPhotons {
    type Item = OnePhoton;
    type IntoIter = std::vec::IntoIter<OnePhoton>;

    fn into_iter(self) -> Self::IntoIter {
        self.photons.into_iter()
    }
}

impl<'a> IntoIterator for &'a SimPhotons {
    type Item = &'a OnePhoton;
    type IntoIter = std::slice::Iter<'a, OnePhoton>;

    fn into_iter(self) -> Self::IntoIter {
        self.photons.iter()
    }
}

impl AddAssign<&SimPhotons> for SimPhotons {
    fn add_assign(&mut self, rhs: &SimPhotons) {
        self.photons.extend_from_slice(&rhs.photons);
    }
}

impl AddAssign for SimPhotons {
    fn add_assign(&mut self, rhs: SimPhotons) {
        self.photons.extend(rhs.photons);
    }
}

impl Add<&SimPhotons> for &SimPhotons {
    type Output = SimPhotons;

    fn add(self, rhs: &SimPhotons) -> SimPhotons {
        let mut sum = self.clone();
        sum += rhs;
        sum
    }
}

impl Add for SimPhotons {
    type Output = SimPhotons;

    fn add(mut self, rhs: SimPhotons) -> SimPhotons {
        self += rhs;
        self
    }
}

/// Number of photons detected by a single optical channel, per time bin.
///
/// This is the lightweight alternative to [`SimPhotons`] when only the count
/// of photons matters. Merging adds the counts bin by bin; a bin missing on
/// one side counts as zero. Counts wrap around on overflow.
///
/// # Examples
///
/// ```
/// use dataobj::photons::SimPhotonsLite;
///
/// let a = SimPhotonsLite::from([(5, 3)]);
/// let b = SimPhotonsLite::from([(5, 2), (7, 1)]);
///
/// let sum = &a + &b;
/// assert_eq!(sum.count_at(5), 5);
/// assert_eq!(sum.count_at(7), 1);
/// assert_eq!(sum.count_at(9), 0);
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SimPhotonsLite {
    op_channel: i32,
    detected_photons: BTreeMap<i32, i32>,
}

impl SimPhotonsLite {
    /// Creates an empty map for channel 0.
    pub fn new() -> Self {
        Self::default()
    }
    /// Creates an empty map for the given optical channel.
    pub fn with_channel(op_channel: i32) -> Self {
        Self {
            op_channel,
            detected_photons: BTreeMap::new(),
        }
    }
    /// Optical channel the photons belong to.
    pub fn op_channel(&self) -> i32 {
        self.op_channel
    }
    /// Assigns the photons to another optical channel.
    pub fn set_channel(&mut self, op_channel: i32) {
        self.op_channel = op_channel;
    }
    /// Time bin to photon count. Only bins that were ever filled are present.
    pub fn detected_photons(&self) -> &BTreeMap<i32, i32> {
        &self.detected_photons
    }
    /// Adds `count` photons to `time_bin`, creating the bin if needed.
    pub fn add_photons(&mut self, time_bin: i32, count: i32) {
        let bin = self.detected_photons.entry(time_bin).or_insert(0);
        *bin = bin.wrapping_add(count);
    }
    /// Returns the number of photons in `time_bin`.
    pub fn count_at(&self, time_bin: i32) -> i32 {
        self.detected_photons.get(&time_bin).copied().unwrap_or(0)
    }
    /// Returns the number of photons summed over all time bins.
    pub fn total_photons(&self) -> i64 {
        self.detected_photons
            .values()
            .map(|&count| i64::from(count))
            .sum()
    }
}

impl FromIterator<(i32, i32)> for SimPhotonsLite {
    /// Repeated time bins have their counts added together.
    fn from_iter<T>(iter: T) -> Self
    where
        T: IntoIterator<Item = (i32, i32)>,
    {
        let mut lite = Self::new();
        for (time_bin, count) in iter {
            lite.add_photons(time_bin, count);
        }

        lite
    }
}

impl<const N: usize> From<[(i32, i32); N]> for SimPhotonsLite {
    /// Converts a `[(time_bin, count); N]` into a `SimPhotonsLite` on
    /// channel 0.
    fn from(arr: [(i32, i32); N]) -> Self {
        Self::from_iter(arr)
    }
}

impl From<&SimPhotons> for SimPhotonsLite {
    /// Counts the photons of a [`SimPhotons`] in 1 ns bins. Each photon goes
    /// to the bin given by the integer part of its arrival time.
    ///
    /// # Examples
    ///
    /// ```
    /// use dataobj::photons::{OnePhoton, SimPhotons, SimPhotonsLite};
    ///
    /// let photons: SimPhotons = [0.2, 0.9, 3.5]
    ///     .into_iter()
    ///     .map(|time| OnePhoton { time, ..Default::default() })
    ///     .collect();
    ///
    /// let lite = SimPhotonsLite::from(&photons);
    /// assert_eq!(lite.count_at(0), 2);
    /// assert_eq!(lite.count_at(3), 1);
    /// ```
    fn from(photons: &SimPhotons) -> Self {
        let mut lite = Self::with_channel(photons.op_channel());
        for photon in photons {
            lite.add_photons(photon.time.floor() as i32, 1);
        }

        lite
    }
}

impl AddAssign<&SimPhotonsLite> for SimPhotonsLite {
    fn add_assign(&mut self, rhs: &SimPhotonsLite) {
        for (&time_bin, &count) in &rhs.detected_photons {
            self.add_photons(time_bin, count);
        }
    }
}

impl AddAssign for SimPhotonsLite {
    fn add_assign(&mut self, rhs: SimPhotonsLite) {
        *self += &rhs;
    }
}

impl Add<&SimPhotonsLite> for &SimPhotonsLite {
    type Output = SimPhotonsLite;

    fn add(self, rhs: &SimPhotonsLite) -> SimPhotonsLite {
        let mut sum = self.clone();
        sum += rhs;
        sum
    }
}

impl Add for SimPhotonsLite {
    type Output = SimPhotonsLite;

    fn add(mut self, rhs: SimPhotonsLite) -> SimPhotonsLite {
        self += &rhs;
        self
    }
}

/// Name given to a collection produced by [`SimPhotonsCollection::merge_collections`].
pub const COMPOSITE_SD_NAME: &str = "CompositeHitCollection";

/// The photons detected in one event, for every optical channel.
///
/// There is intentionally no `+`/`+=` at this level. Use
/// [`SimPhotonsCollection::merge_collections`] to combine two collections.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SimPhotonsCollection {
    sd_name: String,
    channels: BTreeMap<i32, SimPhotons>,
}

impl SimPhotonsCollection {
    /// Creates an empty collection.
    pub fn new() -> Self {
        Self::default()
    }
    /// Name of the sensitive detector that produced the photons.
    pub fn sd_name(&self) -> &str {
        &self.sd_name
    }
    /// Renames the sensitive detector.
    pub fn set_sd_name(&mut self, name: impl Into<String>) {
        self.sd_name = name.into();
    }
    /// Number of channels with a photon list.
    pub fn len(&self) -> usize {
        self.channels.len()
    }
    /// Returns `true` if no channel has a photon list.
    pub fn is_empty(&self) -> bool {
        self.channels.is_empty()
    }
    /// Returns the photon list of `channel`, if any.
    pub fn get(&self, channel: i32) -> Option<&SimPhotons> {
        self.channels.get(&channel)
    }
    /// Returns the photon list of `channel` for modification, if any.
    pub fn get_mut(&mut self, channel: i32) -> Option<&mut SimPhotons> {
        self.channels.get_mut(&channel)
    }
    /// Inserts the photon list of `channel`, returning the list it replaced.
    pub fn insert(&mut self, channel: i32, photons: SimPhotons) -> Option<SimPhotons> {
        self.channels.insert(channel, photons)
    }
    /// Returns the photon list of `channel`, creating an empty one on that
    /// channel if it does not exist yet.
    pub fn get_or_insert(&mut self, channel: i32) -> &mut SimPhotons {
        self.channels
            .entry(channel)
            .or_insert_with(|| SimPhotons::with_channel(channel))
    }
    /// Iterates over `(channel, photons)` in increasing channel order.
    pub fn iter(&self) -> btree_map::Iter<'_, i32, SimPhotons> {
        self.channels.iter()
    }
    /// Appends the photons of every channel in `other` to the photons of the
    /// same channel in `self`. Channels only present in `other` are created.
    /// The merged collection is renamed to [`COMPOSITE_SD_NAME`].
    ///
    /// # Examples
    ///
    /// ```
    /// use dataobj::photons::{OnePhoton, SimPhotonsCollection};
    ///
    /// let mut a = SimPhotonsCollection::new();
    /// a.get_or_insert(1).push(OnePhoton::default());
    /// let mut b = SimPhotonsCollection::new();
    /// b.get_or_insert(1).push(OnePhoton::default());
    /// b.get_or_insert(2).push(OnePhoton::default());
    ///
    /// a.merge_collections(&b);
    /// assert_eq!(a.get(1).map(|p| p.len()), Some(2));
    /// assert_eq!(a.get(2).map(|p| p.len()), Some(1));
    /// assert_eq!(a.sd_name(), "CompositeHitCollection");
    /// ```
    pub fn merge_collections(&mut self, other: &SimPhotonsCollection) -> &mut Self {
        let mut created = 0;
        for (&channel, photons) in &other.channels {
            if !self.channels.contains_key(&channel) {
                trace!("creating photon list for optical channel {channel}");
                created += 1;
            }
            *self.get_or_insert(channel) += photons;
        }
        debug!(
            "merged {} optical channels into `{}` ({created} new)",
            other.len(),
            self.sd_name
        );
        self.set_sd_name(COMPOSITE_SD_NAME);

        self
    }
}

impl<'a> IntoIterator for &'a SimPhotonsCollection {
    type Item = (&'a i32, &'a SimPhotons);
    type IntoIter = btree_map::Iter<'a, i32, SimPhotons>;

    fn into_iter(self) -> Self::IntoIter {
        self.channels.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    fn photon(time: f32) -> OnePhoton {
        OnePhoton {
            time,
            ..Default::default()
        }
    }

    fn photons(times: &[f32]) -> SimPhotons {
        times.iter().copied().map(photon).collect()
    }

    fn times(photons: &SimPhotons) -> Vec<f32> {
        photons.iter().map(|p| p.time).collect()
    }

    fn random_lite(rng: &mut StdRng) -> SimPhotonsLite {
        let len = rng.random_range(0..10);
        (0..len)
            .map(|_| (rng.random_range(-5..5), rng.random_range(0..100)))
            .collect()
    }

    #[test]
    fn one_photon_default() {
        let photon = OnePhoton::default();

        assert!(!photon.in_sd);
        assert_eq!(photon.initial_position, Vector3::new(0.0, 0.0, 0.0));
        assert_eq!(photon.final_local_position, Vector3::default());
        assert_eq!(photon.time, 0.0);
        assert_eq!(photon.energy, 0.0);
        assert_eq!(photon.mother_track_id, 0);
    }

    #[test]
    fn sim_photons_new() {
        let photons = SimPhotons::new();

        assert!(photons.is_empty());
        assert_eq!(photons.op_channel(), 0);
        assert_eq!(SimPhotons::with_channel(7).op_channel(), 7);
    }

    #[test]
    fn sim_photons_add_assign_appends() {
        let mut a = photons(&[3.0, 1.0]);
        let b = photons(&[2.0, 1.0]);

        a += &b;
        assert_eq!(times(&a), vec![3.0, 1.0, 2.0, 1.0]);
        assert_eq!(times(&b), vec![2.0, 1.0]);
    }

    #[test]
    fn sim_photons_add_keeps_operands() {
        let mut a = photons(&[1.0]);
        a.set_channel(3);
        let mut b = photons(&[2.0]);
        b.set_channel(9);

        let sum = &a + &b;
        assert_eq!(times(&sum), vec![1.0, 2.0]);
        assert_eq!(sum.op_channel(), 3);
        assert_eq!(times(&a), vec![1.0]);
        assert_eq!(times(&b), vec![2.0]);

        assert_eq!(a.clone() + b.clone(), sum);
    }

    #[test]
    fn sim_photons_merge_associative() {
        let a = photons(&[1.0, 2.0]);
        let b = photons(&[3.0]);
        let c = photons(&[4.0, 5.0]);

        let mut left = a.clone();
        left += &b;
        left += &c;

        let right = &a + &(&b + &c);
        assert_eq!(left, right);
        assert_eq!(times(&left), vec![1.0, 2.0, 3.0, 4.0, 5.0]);
    }

    #[test]
    fn sim_photons_merge_identity() {
        let a = photons(&[1.0, 2.0]);
        let empty = SimPhotons::new();

        assert_eq!(&a + &empty, a);
        assert_eq!(times(&(&empty + &a)), times(&a));
    }

    #[test]
    fn sim_photons_lite_merge() {
        let mut a = SimPhotonsLite::from([(5, 3)]);
        let b = SimPhotonsLite::from([(5, 2), (7, 1)]);

        a += &b;
        assert_eq!(a, SimPhotonsLite::from([(5, 5), (7, 1)]));
        assert_eq!(b, SimPhotonsLite::from([(5, 2), (7, 1)]));
        assert_eq!(a.total_photons(), 6);
    }

    #[test]
    fn sim_photons_lite_merge_identity() {
        let a = SimPhotonsLite::from([(1, 4), (-3, 2)]);
        let empty = SimPhotonsLite::new();

        assert_eq!(&a + &empty, a);
        assert_eq!(&empty + &a, a);
    }

    #[test]
    fn sim_photons_lite_merge_laws() {
        let mut rng = StdRng::seed_from_u64(42);

        for _ in 0..100 {
            let a = random_lite(&mut rng);
            let b = random_lite(&mut rng);
            let c = random_lite(&mut rng);

            assert_eq!(
                (&a + &b).detected_photons(),
                (&b + &a).detected_photons()
            );
            assert_eq!(&(&a + &b) + &c, &a + &(&b + &c));
        }
    }

    #[test]
    fn sim_photons_lite_keeps_left_channel() {
        let a = SimPhotonsLite::with_channel(2);
        let mut b = SimPhotonsLite::from([(0, 1)]);
        b.set_channel(5);

        let sum = a + b;
        assert_eq!(sum.op_channel(), 2);
        assert_eq!(sum.count_at(0), 1);
    }

    #[test]
    fn sim_photons_lite_from_sim_photons() {
        let mut list = photons(&[0.0, 0.5, 1.0, -0.5, 10.99]);
        list.set_channel(8);

        let lite = SimPhotonsLite::from(&list);
        assert_eq!(lite.op_channel(), 8);
        assert_eq!(
            lite.detected_photons(),
            &BTreeMap::from([(-1, 1), (0, 2), (1, 1), (10, 1)])
        );
    }

    #[test]
    fn sim_photons_lite_wraps() {
        let mut lite = SimPhotonsLite::from([(0, i32::MAX)]);
        lite.add_photons(0, 1);

        assert_eq!(lite.count_at(0), i32::MIN);
    }

    #[test]
    fn collection_new() {
        let collection = SimPhotonsCollection::new();

        assert!(collection.is_empty());
        assert_eq!(collection.sd_name(), "");
    }

    #[test]
    fn collection_get_or_insert() {
        let mut collection = SimPhotonsCollection::new();

        assert!(collection.get(4).is_none());
        collection.get_or_insert(4).push(photon(1.0));
        collection.get_or_insert(4).push(photon(2.0));

        let list = collection.get(4).unwrap();
        assert_eq!(list.op_channel(), 4);
        assert_eq!(times(list), vec![1.0, 2.0]);
        assert_eq!(collection.len(), 1);
    }

    #[test]
    fn collection_insert() {
        let mut collection = SimPhotonsCollection::new();

        assert!(collection.insert(1, photons(&[1.0])).is_none());
        let replaced = collection.insert(1, photons(&[2.0])).unwrap();
        assert_eq!(times(&replaced), vec![1.0]);

        collection.get_mut(1).unwrap().push(photon(3.0));
        assert_eq!(times(collection.get(1).unwrap()), vec![2.0, 3.0]);
    }

    #[test]
    fn collection_merge() {
        let mut a = SimPhotonsCollection::new();
        a.set_sd_name("PhotonDetector");
        a.insert(1, photons(&[1.0]));
        a.insert(2, photons(&[2.0]));

        let mut b = SimPhotonsCollection::new();
        b.insert(2, photons(&[20.0]));
        b.insert(3, photons(&[30.0]));

        a.merge_collections(&b);
        assert_eq!(a.sd_name(), COMPOSITE_SD_NAME);
        assert_eq!(
            a.iter()
                .map(|(&channel, list)| (channel, times(list)))
                .collect::<Vec<_>>(),
            vec![(1, vec![1.0]), (2, vec![2.0, 20.0]), (3, vec![30.0])]
        );
        assert_eq!(a.get(3).unwrap().op_channel(), 3);
        assert_eq!(b.len(), 2);
    }

    #[test]
    fn collection_merge_empty() {
        let mut a = SimPhotonsCollection::new();
        a.insert(1, photons(&[1.0]));
        let before = a.clone();

        a.merge_collections(&SimPhotonsCollection::new());
        assert_eq!(a.get(1), before.get(1));
        assert_eq!(a.len(), 1);
    }
}
