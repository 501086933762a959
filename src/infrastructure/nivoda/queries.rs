//! GraphQL query documents for the Nivoda API
//!
//! Documents are fixed strings; all caller input travels in the structured
//! variables payload, never interpolated into the document text.

pub const SEARCH_DIAMONDS: &str = r#"
query SearchDiamonds($filters: DiamondFilters!, $page: Int!, $limit: Int!) {
    diamonds_by_query(
        query: $filters
        offset: $page
        limit: $limit
    ) {
        items {
            id
            video
            image
            availability
            supplierStockId
            brown
            green
            milky
            eyeClean
            blue
            gray
            other
            certificate {
                id
                lab
                shape
                certNumber
                cut
                carats
                clarity
                color
                polish
                symmetry
                fluorescence
                measurements
            }
            delivery_time {
                express_timeline
                standard_timeline
            }
            price
            discount
            depth
            table
            girdle
            culet
            measurements {
                length
                width
                depth
            }
        }
        total_count
        page_info {
            has_next_page
            has_previous_page
            start_cursor
            end_cursor
        }
    }
}
"#;

pub const GET_DIAMOND: &str = r#"
query GetDiamond($id: String!) {
    diamond(id: $id) {
        id
        video
        image
        availability
        supplierStockId
        brown
        green
        milky
        eyeClean
        blue
        gray
        other
        certificate {
            id
            lab
            shape
            certNumber
            cut
            carats
            clarity
            color
            polish
            symmetry
            fluorescence
            measurements
            date_created
        }
        delivery_time {
            express_timeline
            standard_timeline
        }
        price
        discount
        depth
        table
        girdle
        culet
        measurements {
            length
            width
            depth
        }
        mine_of_origin
        country_of_origin
    }
}
"#;

pub const GET_DIAMOND_MEDIA: &str = r#"
query GetDiamondMedia($id: String!) {
    diamond(id: $id) {
        image
        video
        certificate {
            certNumber
            lab
        }
    }
}
"#;

pub const TEST_CONNECTION: &str = r#"
query TestConnection {
    diamonds_by_query(limit: 1) {
        total_count
    }
}
"#;
