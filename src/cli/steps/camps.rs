use kyc_core::{validation::fields, CampSelectionWidget};
use kyc_domain::{Camp, CampBooking, CampSelection, DraftPatch, RoomType};

use super::StepContext;
use crate::cli::{
    output,
    prompter::{number, Prompter},
};
use crate::errors::AppError;

pub fn prompt(prompter: &mut dyn Prompter, ctx: &StepContext<'_>) -> Result<DraftPatch, AppError> {
    if let Some(message) = ctx.errors.get(fields::SELECTED_CAMPS) {
        output::error(message);
    }
    for (_, message) in ctx.errors.with_prefix("selectedCamps.") {
        output::error(message);
    }

    let camps = ctx.catalog.camps();
    for camp in camps {
        render_card(camp);
    }

    let mut widget = CampSelectionWidget::from_draft(ctx.catalog, ctx.draft);
    let items: Vec<String> = camps.iter().map(Camp::display_label).collect();
    let checked: Vec<bool> = camps.iter().map(|camp| widget.is_selected(&camp.id)).collect();
    let picked = prompter.multi_select("Select the camps you'd like to visit", &items, &checked)?;

    for (index, camp) in camps.iter().enumerate() {
        if picked.contains(&index) != widget.is_selected(&camp.id) {
            widget.toggle(&camp.id)?;
        }
    }

    let selected: Vec<String> = widget
        .bookings()
        .iter()
        .map(|booking| booking.camp_id.clone())
        .collect();
    for camp_id in selected {
        let Some(booking) = widget.booking(&camp_id).cloned() else {
            continue;
        };
        let room_types = ctx
            .catalog
            .find(&camp_id)
            .map(|camp| camp.room_types.clone())
            .filter(|types| !types.is_empty())
            .unwrap_or_else(|| RoomType::ALL.to_vec());
        let edited = adjust_booking(prompter, booking, &room_types)?;
        widget.update_booking(&camp_id, |current| *current = edited)?;
    }

    Ok(widget.into_patch(ctx.draft.start_date()))
}

fn render_card(camp: &Camp) {
    output::line(format!("• {}", camp.display_label()));
    output::line(format!("  {}", camp.description));
    if !camp.features.is_empty() {
        let features: Vec<String> = camp
            .features
            .iter()
            .map(|feature| kyc_domain::tags::label(feature))
            .collect();
        output::line(format!("  Highlights: {}", features.join(", ")));
    }
    let rooms: Vec<&str> = camp.room_types.iter().map(|room| room.as_str()).collect();
    output::line(format!("  Rooms: {}", rooms.join(", ")));
}

fn adjust_booking(
    prompter: &mut dyn Prompter,
    mut booking: CampBooking,
    room_types: &[RoomType],
) -> Result<CampBooking, AppError> {
    let question = format!(
        "Adjust booking at {}? ({} nights, {} room, {} room(s))",
        booking.camp_name, booking.number_of_nights, booking.room_type, booking.number_of_rooms
    );
    if !prompter.confirm(&question, false)? {
        return Ok(booking);
    }

    booking.number_of_nights = number(prompter, "Number of nights", booking.number_of_nights, 1..)?;

    let items: Vec<String> = room_types.iter().map(RoomType::to_string).collect();
    let default = room_types
        .iter()
        .position(|room| *room == booking.room_type)
        .unwrap_or(0);
    let choice = prompter.select("Room type", &items, default)?;
    booking.room_type = room_types.get(choice).copied().unwrap_or_default();

    booking.number_of_rooms = number(prompter, "Number of rooms", booking.number_of_rooms, 1..)?;

    let request = prompter.text(
        "Special request for this camp",
        booking.special_requests.as_deref(),
    )?;
    let request = request.trim();
    booking.special_requests = (!request.is_empty()).then(|| request.to_string());
    Ok(booking)
}

pub fn summary(selection: &CampSelection) -> Vec<String> {
    if selection.selected_camps.is_empty() {
        return vec!["Camps       : None selected".to_string()];
    }
    selection
        .selected_camps
        .iter()
        .map(|booking| {
            let mut line = format!(
                "Camp        : {}, {} night(s), {} x {} room, from {}",
                booking.camp_name,
                booking.number_of_nights,
                booking.number_of_rooms,
                booking.room_type,
                booking.check_in
            );
            if let Some(request) = &booking.special_requests {
                line.push_str(&format!(" ({request})"));
            }
            line
        })
        .collect()
}
