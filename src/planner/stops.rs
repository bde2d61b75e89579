use crate::entities::{GeoPoint, StopData, Waypoint, WaypointKind};
use crate::planner::Refusal;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
enum RideMode {
    #[default]
    Shared,
    /// Private ride: origin and destination only.
    FullCar,
}

/// Outcome of switching ride mode.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ModeChange {
    pub removed: Vec<Waypoint>,
}

impl ModeChange {
    pub fn notice(&self) -> Option<String> {
        match self.removed.len() {
            0 => None,
            1 => Some("1 stop was removed for the full car ride".into()),
            n => Some(format!("{} stops were removed for the full car ride", n)),
        }
    }
}

/// Ordered waypoints of a ride: one origin first, one destination last, any
/// number of intermediate stops between. Ids are `1..=N` in order after every
/// mutation, and refused operations leave the sequence untouched.
#[derive(Clone, Debug, Default)]
pub struct StopSequence {
    waypoints: Vec<Waypoint>,
    mode: RideMode,
}

impl StopSequence {
    pub fn new() -> Self {
        Default::default()
    }

    pub fn is_initialized(&self) -> bool {
        !self.waypoints.is_empty()
    }

    pub fn waypoints(&self) -> &[Waypoint] {
        &self.waypoints
    }

    pub fn len(&self) -> usize {
        self.waypoints.len()
    }

    pub fn is_empty(&self) -> bool {
        self.waypoints.is_empty()
    }

    pub fn is_full_car(&self) -> bool {
        self.mode == RideMode::FullCar
    }

    pub fn origin(&self) -> Option<&Waypoint> {
        self.waypoints.first()
    }

    pub fn destination(&self) -> Option<&Waypoint> {
        self.waypoints.last()
    }

    pub fn intermediates(&self) -> &[Waypoint] {
        match self.waypoints.len() {
            0..=2 => &[],
            n => &self.waypoints[1..n - 1],
        }
    }

    pub fn get(&self, id: u32) -> Option<&Waypoint> {
        self.waypoints.iter().find(|waypoint| waypoint.id == id)
    }

    pub fn locations(&self) -> Vec<GeoPoint> {
        self.waypoints.iter().map(|waypoint| waypoint.location).collect()
    }

    pub fn initialize(
        &mut self,
        origin: StopData,
        destination: StopData,
    ) -> Result<&[Waypoint], Refusal> {
        if self.is_initialized() {
            return Err(Refusal::AlreadyInitialized);
        }

        self.waypoints = vec![
            Waypoint::new(WaypointKind::Origin, origin),
            Waypoint::new(WaypointKind::Destination, destination),
        ];
        self.reindex();

        Ok(&self.waypoints)
    }

    /// Adds an intermediate stop right before the destination.
    pub fn insert_stop(&mut self, data: StopData) -> Result<&[Waypoint], Refusal> {
        self.ensure_accepts_stops()?;

        let at = self.waypoints.len() - 1;
        self.waypoints
            .insert(at, Waypoint::new(WaypointKind::Intermediate, data));
        self.reindex();

        Ok(&self.waypoints)
    }

    pub fn remove_stop(&mut self, id: u32) -> Result<Waypoint, Refusal> {
        let index = self.editable_index(id, "removed")?;
        let removed = self.waypoints.remove(index);
        self.reindex();

        Ok(removed)
    }

    /// Moves an intermediate stop without changing its position in the order.
    pub fn relocate_stop(&mut self, id: u32, data: StopData) -> Result<&Waypoint, Refusal> {
        let index = self.editable_index(id, "moved")?;
        self.waypoints[index].apply(data);

        Ok(&self.waypoints[index])
    }

    /// Checks that `id` names a stop that [`relocate_stop`](Self::relocate_stop)
    /// would accept.
    pub fn check_relocatable(&self, id: u32) -> Result<&Waypoint, Refusal> {
        let index = self.editable_index(id, "moved")?;
        Ok(&self.waypoints[index])
    }

    pub fn ensure_accepts_stops(&self) -> Result<(), Refusal> {
        if !self.is_initialized() {
            return Err(Refusal::NotInitialized);
        }

        if self.is_full_car() {
            return Err(Refusal::FullCar);
        }

        Ok(())
    }

    /// Enabling collapses the sequence to origin and destination. Disabling
    /// changes nothing beyond allowing stops again.
    pub fn toggle_full_car(&mut self, enabled: bool) -> ModeChange {
        if !enabled {
            self.mode = RideMode::Shared;
            return ModeChange::default();
        }

        self.mode = RideMode::FullCar;

        let len = self.waypoints.len();
        if len <= 2 {
            return ModeChange::default();
        }

        let removed: Vec<Waypoint> = self.waypoints.drain(1..len - 1).collect();
        self.reindex();

        ModeChange { removed }
    }

    fn editable_index(&self, id: u32, action: &'static str) -> Result<usize, Refusal> {
        if !self.is_initialized() {
            return Err(Refusal::NotInitialized);
        }

        let index = self
            .waypoints
            .iter()
            .position(|waypoint| waypoint.id == id)
            .ok_or(Refusal::UnknownWaypoint(id))?;

        let waypoint = &self.waypoints[index];
        if !waypoint.is_intermediate() {
            return Err(Refusal::ProtectedWaypoint {
                id,
                kind: waypoint.kind,
                action,
            });
        }

        Ok(index)
    }

    fn reindex(&mut self) {
        for (index, waypoint) in self.waypoints.iter_mut().enumerate() {
            waypoint.id = index as u32 + 1;
        }
    }
}
