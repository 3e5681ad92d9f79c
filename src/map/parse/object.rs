use roxmltree::Node;
use crate::map::{Object, ObjectGroup, Polygon, TmxParseError};
use super::{parse_bool, parse_properties};

impl ObjectGroup {
    pub(crate) fn parse(group_node: Node) -> Result<ObjectGroup, TmxParseError> {
        let mut group = ObjectGroup::default();
        for attribute in group_node.attributes() {
            let value = attribute.value();
            match attribute.name() {
                "id" => group.id = value.parse()?,
                "name" => group.name = String::from(value),
                "color" => group.color = String::from(value),
                "opacity" => group.opacity = value.parse()?,
                "visible" => group.visible = parse_bool(value)?,
                _ => {}
            }
        }
        for child in group_node.children() {
            match child.tag_name().name() {
                "properties" => group.properties = parse_properties(child),
                "object" => group.objects.push(Object::parse(child)?),
                _ => {}
            }
        }
        Ok(group)
    }
}

impl Object {
    fn parse(object_node: Node) -> Result<Object, TmxParseError> {
        let mut object = Object::default();
        for attribute in object_node.attributes() {
            let value = attribute.value();
            match attribute.name() {
                "id" => object.id = value.parse()?,
                "name" => object.name = String::from(value),
                "type" | "class" => object.kind = String::from(value),
                "x" => object.x = value.parse()?,
                "y" => object.y = value.parse()?,
                "width" => object.width = value.parse()?,
                "height" => object.height = value.parse()?,
                "rotation" => object.rotation = value.parse()?,
                "gid" => object.gid = value.parse()?,
                "visible" => object.visible = parse_bool(value)?,
                _ => {}
            }
        }
        for child in object_node.children() {
            let points = || Polygon {
                points: String::from(child.attribute("points").unwrap_or_default()),
            };
            match child.tag_name().name() {
                "properties" => object.properties = parse_properties(child),
                "polygon" => object.polygons.push(points()),
                "polyline" => object.polylines.push(points()),
                _ => {}
            }
        }
        Ok(object)
    }
}

#[cfg(test)]
mod test {
    use roxmltree::Document;
    use crate::map::{ObjectGroup, Point};

    #[test]
    fn polylines() {
        let doc = Document::parse(
r#"<objectgroup name="Paths" opacity="0.75" visible="0">
 <properties><property name="layer" value="2"/></properties>
 <object id="4" x="10" y="20" rotation="90">
  <polyline points="0,0 5,-5"/>
  <properties><property name="speed" value="3"/></properties>
 </object>
</objectgroup>"#).unwrap();
        let group = ObjectGroup::parse(doc.root_element()).unwrap();
        assert_eq!(0.75, group.opacity);
        assert!(!group.visible);
        assert_eq!(Some("2"), group.properties.get("layer").map(String::as_str));

        let object = &group.objects[0];
        assert_eq!(4, object.id);
        assert_eq!(90.0, object.rotation);
        assert!(object.polygons.is_empty());
        assert_eq!(Ok(vec![Point::new(0, 0), Point::new(5, -5)]), object.polylines[0].decode());
        assert_eq!(Some("3"), object.properties.get("speed").map(String::as_str));
    }
}
